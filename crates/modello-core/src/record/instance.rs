use crate::{
    field::FieldKind,
    record::RecordDef,
    value::Value,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// InstanceError
///
/// Structural misuse of an instance against its definition. Distinct
/// from validation: constraint violations are data, these are errors.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum InstanceError {
    #[error("record '{record}' has no field '{field}'")]
    UnknownField { record: &'static str, field: String },

    #[error("field '{record}.{field}' is not a nested record list")]
    NotAList {
        record: &'static str,
        field: String,
    },
}

///
/// RecordInstance
///
/// A value assignment for every field of a record type, `Null` for the
/// absent ones. Owned by its creator; validation takes `&mut self` only
/// for the documented canonicalization and prepare-hook side effects.
///

#[derive(Clone, Debug)]
pub struct RecordInstance {
    pub(crate) def: Arc<RecordDef>,
    pub(crate) values: Vec<Value>,
}

impl RecordDef {
    /// A fresh instance with every field absent. Presence of required
    /// fields is a validation-time concern, which keeps partially built
    /// instances workable during incremental construction.
    #[must_use]
    pub fn instance(self: &Arc<Self>) -> RecordInstance {
        RecordInstance {
            def: self.clone(),
            values: vec![Value::Null; self.fields.len()],
        }
    }

    /// An instance populated from `(field_name, value)` pairs. Unknown
    /// names fail; omitted fields stay absent.
    pub fn instantiate<I>(self: &Arc<Self>, values: I) -> Result<RecordInstance, InstanceError>
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let mut instance = self.instance();
        for (name, value) in values {
            instance.set(name, value)?;
        }

        Ok(instance)
    }
}

impl RecordInstance {
    #[must_use]
    pub const fn def(&self) -> &Arc<RecordDef> {
        &self.def
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.def.field_index(name)?;
        Some(&self.values[idx])
    }

    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let idx = self.def.field_index(name)?;
        Some(&mut self.values[idx])
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), InstanceError> {
        let idx = self
            .def
            .field_index(name)
            .ok_or_else(|| InstanceError::UnknownField {
                record: self.def.name,
                field: name.to_string(),
            })?;
        self.values[idx] = value.into();

        Ok(())
    }

    /// Text content of a field, if set to a text value.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Nested record under `name`, if set.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Self> {
        self.get(name).and_then(Value::as_record)
    }

    /// Mutable nested record under `name`, if set. The prepare-hook
    /// entry point for writing derived values into nested fields.
    #[must_use]
    pub fn record_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.get_mut(name).and_then(Value::as_record_mut)
    }

    /// Append a member to a nested-record-list field, creating the list
    /// on first use.
    pub fn push_item(&mut self, name: &str, item: Self) -> Result<(), InstanceError> {
        let idx = self
            .def
            .field_index(name)
            .ok_or_else(|| InstanceError::UnknownField {
                record: self.def.name,
                field: name.to_string(),
            })?;

        if !matches!(self.def.fields[idx].kind, FieldKind::RecordList(_)) {
            return Err(InstanceError::NotAList {
                record: self.def.name,
                field: name.to_string(),
            });
        }

        match &mut self.values[idx] {
            Value::List(items) => items.push(item),
            slot => *slot = Value::List(vec![item]),
        }

        Ok(())
    }

    /// Number of members in a nested-record-list field (absent counts
    /// as empty).
    #[must_use]
    pub fn item_count(&self, name: &str) -> usize {
        match self.get(name) {
            Some(Value::List(items)) => items.len(),
            _ => 0,
        }
    }
}

impl PartialEq for RecordInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.def, &other.def) && self.values == other.values
    }
}

impl Serialize for RecordInstance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let set = self.values.iter().filter(|v| !v.is_null()).count();
        let mut map = serializer.serialize_map(Some(set))?;
        for (field, value) in self.def.fields.iter().zip(&self.values) {
            if !value.is_null() {
                map.serialize_entry(field.name, value)?;
            }
        }
        map.end()
    }
}

///
/// TESTS
///
