//! Outcome of evaluating one expectation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::path::JsonPath;

/// A single divergence between the expected and the actual response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Where the divergence was found.
    pub path: JsonPath,
    /// Human-readable explanation.
    pub message: String,
}

impl Mismatch {
    /// Creates a new mismatch.
    #[must_use]
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.path, self.message)
    }
}

/// Result of checking one expectation against a response.
///
/// Every mismatch found is kept, in discovery order. The first one is the
/// primary divergence reported by [`path`](Self::path) and
/// [`message`](Self::message).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    mismatches: Vec<Mismatch>,
}

impl MatchResult {
    /// A successful result.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            mismatches: Vec::new(),
        }
    }

    /// A failed result with one mismatch.
    #[must_use]
    pub fn fail(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            mismatches: vec![Mismatch::new(path, message)],
        }
    }

    /// Builds a result from collected mismatches; empty means success.
    #[must_use]
    pub const fn from_mismatches(mismatches: Vec<Mismatch>) -> Self {
        Self { mismatches }
    }

    /// Returns true if the expectation held.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn ok(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Location of the first divergence.
    #[must_use]
    pub fn path(&self) -> Option<&JsonPath> {
        self.mismatches.first().map(|m| &m.path)
    }

    /// Message of the first divergence.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.mismatches.first().map(|m| m.message.as_str())
    }

    /// All divergences found.
    #[must_use]
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pass() {
        let result = MatchResult::pass();
        assert!(result.ok());
        assert!(result.path().is_none());
        assert!(result.message().is_none());
    }

    #[test]
    fn test_first_mismatch_is_primary() {
        let result = MatchResult::from_mismatches(vec![
            Mismatch::new(JsonPath::root().join("a"), "first"),
            Mismatch::new(JsonPath::root().join("b"), "second"),
        ]);

        assert!(!result.ok());
        assert_eq!(result.path().map(ToString::to_string), Some("/a".to_string()));
        assert_eq!(result.message(), Some("first"));
        assert_eq!(result.mismatches().len(), 2);
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = Mismatch::new(JsonPath::root().join("id"), "expected 4, got 5");
        assert_eq!(mismatch.to_string(), "at /id: expected 4, got 5");
    }
}
