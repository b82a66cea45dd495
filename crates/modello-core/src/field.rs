use crate::{
    error::SchemaError,
    record::RecordDef,
    value::Value,
};
use convert_case::{Case, Casing};
use std::sync::Arc;

/// Maximum fractional digits a decimal field may declare.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Default output tag for a field or record name: snake_case → PascalCase.
#[must_use]
pub fn default_tag(name: &str) -> String {
    name.to_case(Case::Pascal)
}

///
/// FieldSpec
///
/// Immutable descriptor for one field of a record type: value kind with
/// its constraints, nullability, and the output tag used when the field
/// is rendered. Built once at catalog-definition time; constraint
/// inconsistencies fail here, not during validation.
///

#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub tag: String,
    pub nullable: bool,
    pub kind: FieldKind,
}

///
/// FieldKind
///

#[derive(Clone, Debug)]
pub enum FieldKind {
    Text(TextConstraints),
    Int { max_digits: Option<u32> },
    Decimal { max_digits: Option<u32>, places: u32 },
    Date,
    Record(Arc<RecordDef>),
    RecordList(Arc<RecordDef>),
    Counter { max_len: u32 },
}

impl FieldKind {
    /// Kind name used in violation and render messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int { .. } => "integer",
            Self::Decimal { .. } => "decimal",
            Self::Date => "date",
            Self::Record(_) => "nested record",
            Self::RecordList(_) => "nested record list",
            Self::Counter { .. } => "sequence",
        }
    }
}

///
/// TextConstraints
///

#[derive(Clone, Debug, Default)]
pub struct TextConstraints {
    pub len: Option<u32>,
    pub min_len: Option<u32>,
    pub max_len: Option<u32>,
    pub choices: Option<&'static [&'static str]>,
}

impl TextConstraints {
    fn check(&self, s: &str) -> Vec<String> {
        let mut violations = Vec::new();
        let count = s.chars().count();

        if let Some(len) = self.len {
            if count != len as usize {
                violations.push(format!(
                    "length must be exactly {len} characters; found {count}"
                ));
            }
        }
        if let Some(min) = self.min_len {
            if count < min as usize {
                violations.push(format!(
                    "length must be at least {min} characters; found {count}"
                ));
            }
        }
        if let Some(max) = self.max_len {
            if count > max as usize {
                violations.push(format!(
                    "length must be at most {max} characters; found {count}"
                ));
            }
        }
        if let Some(choices) = self.choices {
            if !choices.contains(&s) {
                violations.push(format!("value '{s}' is not one of {}", choices.join(", ")));
            }
        }

        violations
    }
}

impl FieldSpec {
    pub fn text(name: &'static str) -> TextField {
        TextField {
            name,
            tag: None,
            nullable: false,
            constraints: TextConstraints::default(),
        }
    }

    pub fn int(name: &'static str) -> IntField {
        IntField {
            name,
            tag: None,
            nullable: false,
            max_digits: None,
        }
    }

    pub fn decimal(name: &'static str) -> DecimalField {
        DecimalField {
            name,
            tag: None,
            nullable: false,
            max_digits: None,
            places: 2,
        }
    }

    pub fn date(name: &'static str) -> DateField {
        DateField {
            name,
            tag: None,
            nullable: false,
        }
    }

    /// Externally supplied monotonic sequence string; format-only checks.
    pub fn counter(name: &'static str) -> CounterField {
        CounterField {
            name,
            tag: None,
            nullable: false,
            max_len: 10,
        }
    }

    pub fn nested(name: &'static str, def: &Arc<RecordDef>) -> NestedField {
        NestedField {
            name,
            tag: None,
            nullable: false,
            def: def.clone(),
        }
    }

    pub fn nested_list(name: &'static str, def: &Arc<RecordDef>) -> NestedListField {
        NestedListField {
            name,
            tag: None,
            def: def.clone(),
        }
    }

    /// Check `value` against this field's constraints. Violations are
    /// returned as data; an empty list means pass. Absent values pass
    /// for nullable fields and fail otherwise.
    ///
    /// Decimal canonicalization is an observable side effect: the value
    /// is rounded in place to the declared places, and that canonical
    /// value is what later serializes.
    ///
    /// Nested-record kinds get a shape check only; recursing into the
    /// nested instance is the record walk's job.
    pub fn validate_value(&self, value: &mut Value) -> Vec<String> {
        if value.is_null() {
            return if self.nullable {
                Vec::new()
            } else {
                vec!["value is required".to_string()]
            };
        }

        match (&self.kind, value) {
            (FieldKind::Text(constraints), Value::Text(s)) => constraints.check(s),

            (FieldKind::Int { max_digits }, Value::Int(i)) => {
                let digits = i.unsigned_abs().to_string().len();
                match max_digits {
                    Some(max) if digits > *max as usize => {
                        vec![format!("must have at most {max} digits; found {digits}")]
                    }
                    _ => Vec::new(),
                }
            }

            (FieldKind::Decimal { max_digits, places }, Value::Decimal(d)) => {
                *d = d.round_dp(*places);
                let digits = d.digit_count(*places);
                match max_digits {
                    Some(max) if digits > *max as usize => {
                        vec![format!("must have at most {max} digits; found {digits}")]
                    }
                    _ => Vec::new(),
                }
            }

            (FieldKind::Date, Value::Date(_)) => Vec::new(),

            (FieldKind::Counter { max_len }, Value::Text(s)) => {
                let mut violations = Vec::new();
                if s.is_empty() {
                    violations.push("sequence value must not be empty".to_string());
                }
                if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
                    violations.push("sequence value must be alphanumeric".to_string());
                }
                let count = s.chars().count();
                if count > *max_len as usize {
                    violations.push(format!(
                        "sequence value must be at most {max_len} characters; found {count}"
                    ));
                }
                violations
            }

            (FieldKind::Record(_), Value::Record(_))
            | (FieldKind::RecordList(_), Value::List(_)) => Vec::new(),

            (kind, other) => {
                vec![format!(
                    "expected {} value, found {}",
                    kind.name(),
                    other.kind_name()
                )]
            }
        }
    }

    /// Canonical external text for a scalar value of this field.
    /// Errors carry a message only; the caller supplies the path.
    pub(crate) fn render_scalar(&self, value: &Value) -> Result<String, String> {
        match (&self.kind, value) {
            (FieldKind::Text(_) | FieldKind::Counter { .. }, Value::Text(s)) => Ok(s.clone()),
            (FieldKind::Int { .. }, Value::Int(i)) => Ok(i.to_string()),
            (FieldKind::Decimal { places, .. }, Value::Decimal(d)) => Ok(d.to_fixed(*places)),
            (FieldKind::Date, Value::Date(d)) => Ok(d.to_string()),
            _ => Err(format!(
                "cannot render {} value as {}",
                value.kind_name(),
                self.kind.name()
            )),
        }
    }
}

macro_rules! impl_field_builder_common {
    ( $( $builder:ident ),* ) => {
        $(
            impl $builder {
                /// Override the output tag (default: PascalCase of the field name).
                #[must_use]
                pub fn tag(mut self, tag: impl Into<String>) -> Self {
                    self.tag = Some(tag.into());
                    self
                }

                #[must_use]
                pub const fn nullable(mut self) -> Self {
                    self.nullable = true;
                    self
                }
            }
        )*
    };
}

impl_field_builder_common!(TextField, IntField, DecimalField, DateField, CounterField, NestedField);

///
/// TextField
///

#[derive(Debug)]
pub struct TextField {
    name: &'static str,
    tag: Option<String>,
    nullable: bool,
    constraints: TextConstraints,
}

impl TextField {
    #[must_use]
    pub const fn len(mut self, len: u32) -> Self {
        self.constraints.len = Some(len);
        self
    }

    #[must_use]
    pub const fn min_len(mut self, min: u32) -> Self {
        self.constraints.min_len = Some(min);
        self
    }

    #[must_use]
    pub const fn max_len(mut self, max: u32) -> Self {
        self.constraints.max_len = Some(max);
        self
    }

    #[must_use]
    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.constraints.choices = Some(choices);
        self
    }

    pub fn build(self) -> Result<FieldSpec, SchemaError> {
        let c = &self.constraints;

        if c.len.is_some() && (c.min_len.is_some() || c.max_len.is_some()) {
            return Err(SchemaError::ConflictingLength { field: self.name });
        }
        if let (Some(min), Some(max)) = (c.min_len, c.max_len) {
            if min > max {
                return Err(SchemaError::InvertedLengthBounds {
                    field: self.name,
                    min,
                    max,
                });
            }
        }
        if let Some(choices) = c.choices {
            if choices.is_empty() {
                return Err(SchemaError::EmptyChoices { field: self.name });
            }
        }

        Ok(FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| default_tag(self.name)),
            nullable: self.nullable,
            kind: FieldKind::Text(self.constraints),
        })
    }
}

///
/// IntField
///

#[derive(Debug)]
pub struct IntField {
    name: &'static str,
    tag: Option<String>,
    nullable: bool,
    max_digits: Option<u32>,
}

impl IntField {
    #[must_use]
    pub const fn max_digits(mut self, max: u32) -> Self {
        self.max_digits = Some(max);
        self
    }

    #[must_use]
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| default_tag(self.name)),
            nullable: self.nullable,
            kind: FieldKind::Int {
                max_digits: self.max_digits,
            },
        }
    }
}

///
/// DecimalField
///

#[derive(Debug)]
pub struct DecimalField {
    name: &'static str,
    tag: Option<String>,
    nullable: bool,
    max_digits: Option<u32>,
    places: u32,
}

impl DecimalField {
    #[must_use]
    pub const fn max_digits(mut self, max: u32) -> Self {
        self.max_digits = Some(max);
        self
    }

    /// Fixed fractional digits in the canonical rendering (default 2).
    #[must_use]
    pub const fn places(mut self, places: u32) -> Self {
        self.places = places;
        self
    }

    pub fn build(self) -> Result<FieldSpec, SchemaError> {
        if self.places > MAX_DECIMAL_PLACES {
            return Err(SchemaError::ExcessivePlaces {
                field: self.name,
                places: self.places,
                max: MAX_DECIMAL_PLACES,
            });
        }
        if let Some(max_digits) = self.max_digits {
            if self.places > max_digits {
                return Err(SchemaError::PlacesExceedDigits {
                    field: self.name,
                    places: self.places,
                    max_digits,
                });
            }
        }

        Ok(FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| default_tag(self.name)),
            nullable: self.nullable,
            kind: FieldKind::Decimal {
                max_digits: self.max_digits,
                places: self.places,
            },
        })
    }
}

///
/// DateField
///

#[derive(Debug)]
pub struct DateField {
    name: &'static str,
    tag: Option<String>,
    nullable: bool,
}

impl DateField {
    #[must_use]
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| default_tag(self.name)),
            nullable: self.nullable,
            kind: FieldKind::Date,
        }
    }
}

///
/// CounterField
///

#[derive(Debug)]
pub struct CounterField {
    name: &'static str,
    tag: Option<String>,
    nullable: bool,
    max_len: u32,
}

impl CounterField {
    #[must_use]
    pub const fn max_len(mut self, max: u32) -> Self {
        self.max_len = max;
        self
    }

    #[must_use]
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| default_tag(self.name)),
            nullable: self.nullable,
            kind: FieldKind::Counter {
                max_len: self.max_len,
            },
        }
    }
}

///
/// NestedField
///
/// A record type embedded as a single field. The node tag defaults to
/// the nested record's own tag.
///

#[derive(Debug)]
pub struct NestedField {
    name: &'static str,
    tag: Option<String>,
    nullable: bool,
    def: Arc<RecordDef>,
}

impl NestedField {
    #[must_use]
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| self.def.tag().to_string()),
            nullable: self.nullable,
            kind: FieldKind::Record(self.def),
        }
    }
}

///
/// NestedListField
///
/// An ordered sequence of nested records. Renders one node per member
/// with no wrapper around the repetition, so the field is never
/// nullable-distinct from empty; an empty list simply renders nothing.
///

#[derive(Debug)]
pub struct NestedListField {
    name: &'static str,
    tag: Option<String>,
    def: Arc<RecordDef>,
}

impl NestedListField {
    /// Override the tag each member node is emitted under.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            tag: self.tag.unwrap_or_else(|| self.def.tag().to_string()),
            nullable: true,
            kind: FieldKind::RecordList(self.def),
        }
    }
}

///
/// TESTS
///
