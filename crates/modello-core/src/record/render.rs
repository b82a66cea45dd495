use crate::{
    field::FieldKind,
    path::Path,
    record::{RecordDef, RecordInstance},
    tree::{Node, TreeBuilder, TreeError},
    value::Value,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// RenderError
///
/// Serialization failure. Local to one field but fatal to the whole
/// call: no partial tree is returned. Serialization does not re-check
/// validation constraints; this only covers values that cannot be
/// rendered in their canonical external form at all.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RenderError {
    #[error("{path}: {message}")]
    Unrepresentable { path: Path, message: String },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl RecordInstance {
    /// Serialize this instance into a tagged node tree.
    ///
    /// The root node opens under `default_namespace`; immediately after,
    /// the default namespace is overridden to none for the remainder of
    /// the document body, so descendant nodes are emitted unqualified
    /// while the root still carries the document default.
    pub fn to_tree(&self, default_namespace: Option<&str>) -> Result<Node, RenderError> {
        let mut builder = TreeBuilder::new(default_namespace);
        {
            let mut root = builder.open(self.def.tag(), &self.def.attrs);
            {
                let mut body = root.override_default_namespace(None);
                self.def
                    .render_fields(self, &mut body, &mut Path::root())?;
            }
        }

        Ok(builder.finish()?)
    }
}

impl RecordDef {
    fn render_node(
        &self,
        instance: &RecordInstance,
        builder: &mut TreeBuilder,
        tag: &str,
        path: &mut Path,
    ) -> Result<(), RenderError> {
        let mut scope = builder.open(tag, &self.attrs);
        self.render_fields(instance, &mut scope, path)
    }

    fn render_fields(
        &self,
        instance: &RecordInstance,
        builder: &mut TreeBuilder,
        path: &mut Path,
    ) -> Result<(), RenderError> {
        for (field, value) in self.fields.iter().zip(&instance.values) {
            match (&field.kind, value) {
                // absent nullable fields render nothing at all
                (_, Value::Null) => {}

                (FieldKind::Record(def), Value::Record(inner)) => {
                    Self::check_member(def, inner, path, field.name)?;
                    path.push(field.name);
                    def.render_node(inner, builder, &field.tag, path)?;
                    path.pop();
                }

                (FieldKind::RecordList(def), Value::List(items)) => {
                    path.push(field.name);
                    for (i, item) in items.iter().enumerate() {
                        Self::check_member(def, item, path, i)?;
                        path.push(i);
                        def.render_node(item, builder, &field.tag, path)?;
                        path.pop();
                    }
                    path.pop();
                }

                (_, value) => {
                    let text = field.render_scalar(value).map_err(|message| {
                        RenderError::Unrepresentable {
                            path: path.child(field.name),
                            message,
                        }
                    })?;
                    builder.text(&field.tag, &text);
                }
            }
        }

        Ok(())
    }

    fn check_member(
        def: &Arc<Self>,
        member: &RecordInstance,
        path: &Path,
        seg: impl Into<crate::path::PathSegment>,
    ) -> Result<(), RenderError> {
        if Arc::ptr_eq(def, &member.def) {
            Ok(())
        } else {
            Err(RenderError::Unrepresentable {
                path: path.child(seg),
                message: format!(
                    "nested record is of type '{}', expected '{}'",
                    member.def.name, def.name
                ),
            })
        }
    }
}

///
/// TESTS
///
