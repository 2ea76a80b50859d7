//! Request parameter helpers.
//!
//! The Graph API takes field selections as a single comma-separated
//! query value. [`Fields`] is the canonical form; callers holding a
//! slice of names construct it once at the boundary and everything
//! below works on the joined string.

use std::fmt;

use crate::error::{GraphError, GraphResult};

/// A normalized, comma-joined field list.
///
/// Exactly one canonical representation regardless of the input
/// container shape. Order is preserved; duplicates are passed through
/// untouched (the server deduplicates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields(String);

impl Fields {
    /// Build a field list from an ordered sequence of names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|f| f.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }

    /// The comma-joined query value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// An already-joined string is its own canonical form.
impl From<&str> for Fields {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Fields {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&[&str]> for Fields {
    fn from(value: &[&str]) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> From<[&str; N]> for Fields {
    fn from(value: [&str; N]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<String>> for Fields {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve one target identifier from two alternates.
///
/// Primary wins when both are present. Fails with
/// [`GraphError::InvalidParameter`] when both are absent, before any
/// request is issued.
pub fn resolve_target<'a>(
    primary: Option<&'a str>,
    secondary: Option<&'a str>,
    what: &str,
) -> GraphResult<&'a str> {
    primary.or(secondary).ok_or_else(|| {
        GraphError::invalid_parameter(format!("Specify at least one of {what}"))
    })
}
