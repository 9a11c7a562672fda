//! Validation findings.
//!
//! This module provides [`Finding`] for a single problem found in the input
//! and [`Findings`] for the non-empty, ordered list attached to an invalid
//! outcome.

use std::fmt::{self, Display};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stillwater::prelude::*;
use tracing::warn;

use crate::path::{JsonPath, PathSegment};

/// A single structured diagnostic.
///
/// `Finding` is what validators report through their sink:
/// - **key**: identifies the kind of finding (e.g. `invalid_type`). Two
///   findings of the same kind share a key whatever input triggered them.
/// - **path**: where in the original input the offending value lives. Leaf
///   validators report at the root; enclosing combinators prepend segments.
/// - **details**: a kind-specific payload, stored as JSON.
///
/// Findings carry no human readable message. Consumers render them from the
/// key and details.
///
/// # Example
///
/// ```rust
/// use scrutiny::{Finding, JsonPath};
/// use serde_json::json;
///
/// let finding = Finding::new("invalid_type")
///     .with_details(json!({"expected_type": "string"}))
///     .at(JsonPath::from_field("name"));
///
/// assert_eq!(finding.key, "invalid_type");
/// assert_eq!(
///     serde_json::to_value(&finding).unwrap(),
///     json!({"key": "invalid_type", "path": ["name"], "details": {"expected_type": "string"}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The kind of finding.
    pub key: String,
    /// Location of the offending value, root first.
    pub path: JsonPath,
    /// Kind-specific payload.
    pub details: Value,
}

impl Finding {
    /// Creates a finding of the given kind at the root path with no details.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: JsonPath::root(),
            details: Value::Null,
        }
    }

    /// Sets the details payload and returns self for chaining.
    ///
    /// Anything serde can serialize is accepted. A payload that cannot be
    /// represented as JSON (such as a map with non-string keys) is stored as
    /// `null` and logged.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).unwrap_or_else(|err| {
            warn!(key = %self.key, error = %err, "finding details are not representable as JSON");
            Value::Null
        });
        self
    }

    /// Sets the path and returns self for chaining.
    pub fn at(mut self, path: JsonPath) -> Self {
        self.path = path;
        self
    }

    /// Returns this finding with `segment` prepended to its path.
    pub fn prefixed(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }

    /// Decodes the details payload into a typed structure.
    pub fn details_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.details)
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.key)?;

        if !self.details.is_null() {
            write!(f, " {}", self.details)?;
        }

        Ok(())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Finding>();
    assert_sync::<Finding>();
};

/// A non-empty, ordered collection of findings.
///
/// `Findings` wraps a `NonEmptyVec<Finding>`, so an invalid outcome can never
/// be built without at least one diagnostic. Order is the order in which the
/// findings were reported.
///
/// # Combining Findings
///
/// ```rust
/// use scrutiny::{Finding, Findings, JsonPath};
/// use stillwater::prelude::*;
///
/// let first = Findings::single(Finding::new("invalid_type").at(JsonPath::from_field("name")));
/// let second = Findings::single(Finding::new("comparison").at(JsonPath::from_field("age")));
///
/// let combined = first.combine(second);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().key, "invalid_type");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Findings(NonEmptyVec<Finding>);

impl Findings {
    /// Creates a `Findings` containing a single finding.
    pub fn single(finding: Finding) -> Self {
        Self(NonEmptyVec::singleton(finding))
    }

    /// Creates a `Findings` from a `NonEmptyVec` of findings.
    pub fn from_non_empty(findings: NonEmptyVec<Finding>) -> Self {
        Self(findings)
    }

    /// Creates a `Findings` from a `Vec`, keeping its order.
    ///
    /// Returns `None` if the vec is empty.
    pub fn from_vec(findings: Vec<Finding>) -> Option<Self> {
        let mut iter = findings.into_iter();
        let head = Self::single(iter.next()?);
        Some(iter.fold(head, |acc, finding| acc.combine(Self::single(finding))))
    }

    /// Returns the number of findings in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API consistency.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained findings.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.0.iter()
    }

    /// Returns all findings at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&Finding> {
        self.0.iter().filter(|f| &f.path == path).collect()
    }

    /// Returns all findings of the specified kind.
    pub fn with_key(&self, key: &str) -> Vec<&Finding> {
        self.0.iter().filter(|f| f.key == key).collect()
    }

    /// Returns the first reported finding.
    pub fn first(&self) -> &Finding {
        self.0.head()
    }

    /// Converts this collection into a `Vec<Finding>`.
    pub fn into_vec(self) -> Vec<Finding> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Finding> {
        &self.0
    }
}

impl Semigroup for Findings {
    fn combine(self, other: Self) -> Self {
        Findings(self.0.combine(other.0))
    }
}

impl Display for Findings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} finding(s):", self.len())?;
        for (i, finding) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, finding)?;
        }
        Ok(())
    }
}

impl std::error::Error for Findings {}

impl IntoIterator for Findings {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = Box<dyn Iterator<Item = &'a Finding> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

impl Serialize for Findings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}
