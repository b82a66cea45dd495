use crate::{
    record::RecordInstance,
    types::{Date, Decimal},
};
use serde::Serialize;

///
/// Value
///
/// One field's content inside a record instance. `Null` stands for an
/// absent value; whether absence is acceptable is the field's call, not
/// the value's.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Decimal(Decimal),
    Date(Date),
    Record(RecordInstance),
    List(Vec<RecordInstance>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Variant name used in violation and render messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::Record(_) => "record",
            Self::List(_) => "record list",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&RecordInstance> {
        match self {
            Self::Record(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut RecordInstance> {
        match self {
            Self::Record(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Self::Date(d)
    }
}

impl From<RecordInstance> for Value {
    fn from(r: RecordInstance) -> Self {
        Self::Record(r)
    }
}

impl From<Vec<RecordInstance>> for Value {
    fn from(items: Vec<RecordInstance>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from("IT"), Value::Text("IT".to_string()));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::from(1i64).kind_name(), "integer");
        assert_eq!(Value::from(Decimal::ZERO).kind_name(), "decimal");
    }
}
