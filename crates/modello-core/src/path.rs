use serde::Serialize;
use std::fmt;

///
/// PathSegment
///
/// One step in an instance path: a field name or a list index.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

impl From<&'static str> for PathSegment {
    fn from(s: &'static str) -> Self {
        Self::Field(s)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

///
/// Path
///
/// Ordered sequence of segments identifying a position in an instance
/// tree. Renders as `a.b[1].c`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, seg: impl Into<PathSegment>) {
        self.0.push(seg.into());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// A copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, seg: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(seg);
        path
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for seg in &self.0 {
            match seg {
                PathSegment::Field(s) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(s)?;
                }
                PathSegment::Index(i) => {
                    write!(f, "[{i}]")?;
                }
            }
            first = false;
        }

        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fields_dotted() {
        let mut path = Path::root();
        path.push("header");
        path.push("sender");
        assert_eq!(path.to_string(), "header.sender");
    }

    #[test]
    fn renders_indexes_bracketed() {
        let mut path = Path::root();
        path.push("lines");
        path.push(1);
        path.push("description");
        assert_eq!(path.to_string(), "lines[1].description");
    }

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().is_empty());
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let path = Path::root().child("a");
        let deeper = path.child(2);
        assert_eq!(path.to_string(), "a");
        assert_eq!(deeper.to_string(), "a[2]");
    }
}
