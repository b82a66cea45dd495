//! Public surface for modello: a declarative record schema, validation,
//! and tagged-tree serialization engine.
//!
//! Consumers declare a catalog of [`RecordDef`]s once at startup, build
//! [`RecordInstance`]s per document, `validate()` to collect a
//! [`Report`] of path-qualified violations, and `to_tree()` to obtain
//! the abstract output tree for external lowering.

pub use modello_core::{
    CheckContext, Date, Decimal, Error, FieldKind, FieldSpec, InstanceError, Node, Path,
    PathSegment, RecordBuilder, RecordDef, RecordInstance, RenderError, Report, SchemaError,
    TreeBuilder, TreeError, Value, Violation,
};

pub use modello_core::values;

pub mod prelude {
    pub use modello_core::prelude::*;
}
