use crate::path::Path;
use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use std::fmt;

///
/// Violation
///
/// One constraint failure: where it happened and what went wrong.
/// For whole-record rules, `fields` names the sibling fields the rule
/// refers to and `path` points at the record itself.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Violation {
    pub path: Path,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<&'static str>,

    pub message: String,
}

impl Violation {
    /// A field-level violation at `path`.
    pub fn field(path: Path, message: impl Into<String>) -> Self {
        Self {
            path,
            fields: Vec::new(),
            message: message.into(),
        }
    }

    /// A whole-record violation referencing sibling `fields`.
    pub fn record(path: Path, fields: &[&'static str], message: impl Into<String>) -> Self {
        Self {
            path,
            fields: fields.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;

        if !self.path.is_empty() {
            write!(f, "{}", self.path)?;
            wrote = true;
        }
        if !self.fields.is_empty() {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "({})", self.fields.join(", "))?;
            wrote = true;
        }
        if wrote {
            f.write_str(": ")?;
        }

        f.write_str(&self.message)
    }
}

///
/// Report
///
/// Aggregated validation outcome. Violations are data, not control flow:
/// a full pass collects every failure across the instance tree before
/// the caller decides what to do with them.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
pub struct Report(#[into_iterator(owned, ref)] Vec<Violation>);

impl Report {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Record a field-level violation at `path`.
    pub fn fail(&mut self, path: Path, message: impl Into<String>) {
        self.push(Violation::field(path, message));
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{violation}")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
