//! Core engine for modello: field descriptors, record definitions with
//! inheritance-aware merge, aggregated path-qualified validation, and
//! serialization into a namespaced tagged-node tree.
//!
//! Definitions form a process-wide, read-only catalog built once at
//! startup; instances and builders are ordinary exclusively-owned data.

pub mod error;
pub mod field;
pub mod path;
pub mod record;
pub mod report;
pub mod tree;
pub mod types;
pub mod value;

pub use error::{Error, SchemaError};
pub use field::{FieldKind, FieldSpec};
pub use path::{Path, PathSegment};
pub use record::{
    CheckContext, InstanceError, RecordBuilder, RecordDef, RecordInstance, RenderError,
};
pub use report::{Report, Violation};
pub use tree::{Node, TreeBuilder, TreeError};
pub use types::{Date, Decimal};
pub use value::Value;

/// Build the `(field_name, value)` pairs accepted by
/// [`RecordDef::instantiate`] from literal-keyed entries.
#[macro_export]
macro_rules! values {
    ( $( $name:literal => $value:expr ),* $(,)? ) => {
        vec![ $( ($name, $crate::Value::from($value)) ),* ]
    };
}

///
/// Prelude
///
/// Domain vocabulary only; errors and builders are imported where used.
///

pub mod prelude {
    pub use crate::{
        field::FieldSpec,
        record::{RecordDef, RecordInstance},
        report::Report,
        types::{Date, Decimal},
        value::Value,
    };
}
