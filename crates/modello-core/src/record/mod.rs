mod instance;
mod render;
mod validate;

pub use instance::{InstanceError, RecordInstance};
pub use render::RenderError;

use crate::{
    error::SchemaError,
    field::{FieldSpec, default_tag},
    path::Path,
    report::{Report, Violation},
};
use std::{collections::BTreeSet, fmt, sync::Arc};

///
/// Hooks
///
/// `PrepareHook` runs at the start of a record's validation pass and may
/// mutate the instance (the transmission-format case: the outermost
/// record derives a value and writes it into a nested field before
/// recursion). `CheckHook` runs after the record's own field checks and
/// reports cross-field rules through [`CheckContext`].
///
/// Hooks are `Send + Sync`: the definition catalog is shared read-only
/// across threads.
///

pub type PrepareHook = Arc<dyn Fn(&mut RecordInstance) + Send + Sync>;
pub type CheckHook = Arc<dyn Fn(&RecordInstance, &mut CheckContext<'_>) + Send + Sync>;

///
/// CheckContext
///
/// Narrow surface handed to whole-record hooks for reporting rule
/// violations against the record's own field names.
///

pub struct CheckContext<'a> {
    pub(crate) path: &'a Path,
    pub(crate) report: &'a mut Report,
}

impl CheckContext<'_> {
    /// Record one violation referencing a subset of this record's own
    /// fields, e.g. "exactly one of A or B must be set".
    pub fn fail(&mut self, fields: &[&'static str], message: impl Into<String>) {
        self.report
            .push(Violation::record(self.path.clone(), fields, message));
    }
}

///
/// RecordDef
///
/// A named, ordered schema of fields with inheritance-aware merge
/// semantics, plus optional hooks, an output tag, and output attributes.
/// Built once via [`RecordDef::define`], then immutable behind an `Arc`;
/// declaration order is stable and equals serialization order.
///

pub struct RecordDef {
    pub(crate) name: &'static str,
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) prepare: Option<PrepareHook>,
    pub(crate) check: Option<CheckHook>,
}

impl RecordDef {
    #[must_use]
    pub fn define(name: &'static str) -> RecordBuilder {
        RecordBuilder {
            name,
            tag: None,
            attrs: Vec::new(),
            parent: None,
            fields: Vec::new(),
            prepare: None,
            check: None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Merged fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl fmt::Debug for RecordDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

///
/// RecordBuilder
///

pub struct RecordBuilder {
    name: &'static str,
    tag: Option<String>,
    attrs: Vec<(String, String)>,
    parent: Option<Arc<RecordDef>>,
    fields: Vec<FieldSpec>,
    prepare: Option<PrepareHook>,
    check: Option<CheckHook>,
}

impl RecordBuilder {
    /// Inherit the parent's fields as the merge base. A same-named field
    /// declared here replaces the parent's slot in place; new names
    /// append. Hooks are inherited unless redeclared.
    #[must_use]
    pub fn parent(mut self, parent: &Arc<RecordDef>) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Override the record's own output tag (default: PascalCase of the
    /// definition name).
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add an output attribute emitted on the record's node.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Shorthand: a record type used directly as a declared field is a
    /// non-nullable nested-record field under that name.
    #[must_use]
    pub fn record(self, name: &'static str, def: &Arc<RecordDef>) -> Self {
        self.field(FieldSpec::nested(name, def).build())
    }

    #[must_use]
    pub fn prepare<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut RecordInstance) + Send + Sync + 'static,
    {
        self.prepare = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn check<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RecordInstance, &mut CheckContext<'_>) + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(hook));
        self
    }

    /// Perform the merge and install the definition. Fails on duplicate
    /// field names among own declarations and on duplicate output tags
    /// within the merged scope.
    pub fn finish(self) -> Result<Arc<RecordDef>, SchemaError> {
        let mut fields: Vec<FieldSpec> = self
            .parent
            .as_ref()
            .map(|p| p.fields.clone())
            .unwrap_or_default();

        let mut declared: BTreeSet<&'static str> = BTreeSet::new();
        for spec in self.fields {
            if !declared.insert(spec.name) {
                return Err(SchemaError::DuplicateField {
                    record: self.name,
                    field: spec.name,
                });
            }

            match fields.iter_mut().find(|slot| slot.name == spec.name) {
                Some(slot) => *slot = spec,
                None => fields.push(spec),
            }
        }

        for (i, left) in fields.iter().enumerate() {
            for right in &fields[i + 1..] {
                if left.tag == right.tag {
                    return Err(SchemaError::DuplicateTag {
                        record: self.name,
                        tag: left.tag.clone(),
                        left: left.name,
                        right: right.name,
                    });
                }
            }
        }

        let prepare = self
            .prepare
            .or_else(|| self.parent.as_ref().and_then(|p| p.prepare.clone()));
        let check = self
            .check
            .or_else(|| self.parent.as_ref().and_then(|p| p.check.clone()));

        Ok(Arc::new(RecordDef {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| default_tag(self.name)),
            attrs: self.attrs,
            fields,
            prepare,
            check,
        }))
    }
}

///
/// TESTS
///
