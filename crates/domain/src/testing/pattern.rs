//! Partial JSON patterns with regular-expression leaves.
//!
//! A [`JsonPattern`] mirrors a JSON document, except that any leaf may be a
//! compiled [`Regex`] acting as a wildcard. Patterns are matched as a subset:
//! only the members they mention are checked.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Object key marking a regex leaf in the JSON form of a pattern.
pub const REGEX_MARKER: &str = "$regex";

/// Expected shape of a JSON value in a partial match.
#[derive(Debug, Clone)]
pub enum JsonPattern {
    /// Matches JSON `null`.
    Null,
    /// Matches an equal boolean.
    Bool(bool),
    /// Matches a numerically equal number.
    Number(serde_json::Number),
    /// Matches an equal string.
    String(String),
    /// Matches any value whose text form satisfies the expression.
    Regex(Regex),
    /// Matches an array of the same length, element by element.
    Array(Vec<JsonPattern>),
    /// Matches an object containing at least these members.
    Object(BTreeMap<String, JsonPattern>),
}

impl JsonPattern {
    /// Compiles a regex leaf.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSpec`] if the expression does not compile.
    pub fn regex(expression: &str) -> DomainResult<Self> {
        Regex::new(expression).map(Self::Regex).map_err(|e| {
            DomainError::invalid_spec(format!("invalid regex pattern '{expression}': {e}"))
        })
    }

    /// Builds an object pattern from key/pattern pairs.
    #[must_use]
    pub fn object<K, P>(members: impl IntoIterator<Item = (K, P)>) -> Self
    where
        K: Into<String>,
        P: Into<Self>,
    {
        Self::Object(
            members
                .into_iter()
                .map(|(key, pattern)| (key.into(), pattern.into()))
                .collect(),
        )
    }

    /// Builds an array pattern from element patterns.
    #[must_use]
    pub fn array<P: Into<Self>>(elements: impl IntoIterator<Item = P>) -> Self {
        Self::Array(elements.into_iter().map(Into::into).collect())
    }

    /// Parses the JSON form of a pattern.
    ///
    /// An object whose only member is `"$regex"` with a string value becomes a
    /// regex leaf; everything else is taken literally.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSpec`] if a regex leaf does not compile.
    pub fn from_json(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(map) => {
                if map.len() == 1
                    && let Some(Value::String(expression)) = map.get(REGEX_MARKER)
                {
                    return Self::regex(expression);
                }
                map.into_iter()
                    .map(|(key, member)| Ok((key, Self::from_json(member)?)))
                    .collect::<DomainResult<BTreeMap<_, _>>>()
                    .map(Self::Object)
            }
            Value::Array(elements) => elements
                .into_iter()
                .map(Self::from_json)
                .collect::<DomainResult<Vec<_>>>()
                .map(Self::Array),
            scalar => Ok(Self::from(scalar)),
        }
    }

    /// Renders the pattern as JSON, writing regex leaves as `{"$regex": ...}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Regex(re) => {
                let mut map = serde_json::Map::new();
                map.insert(REGEX_MARKER.to_string(), Value::String(re.as_str().to_string()));
                Value::Object(map)
            }
            Self::Array(elements) => Value::Array(elements.iter().map(Self::to_json).collect()),
            Self::Object(members) => Value::Object(
                members
                    .iter()
                    .map(|(key, pattern)| (key.clone(), pattern.to_json()))
                    .collect(),
            ),
        }
    }
}

impl PartialEq for JsonPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Literal conversion: every value, including objects with a `"$regex"` key,
/// is matched by equality. Use [`JsonPattern::from_json`] for the marker form.
impl From<Value> for JsonPattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(elements) => Self::Array(elements.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Regex> for JsonPattern {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

impl From<&str> for JsonPattern {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for JsonPattern {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for JsonPattern {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for JsonPattern {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for JsonPattern {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl Serialize for JsonPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for JsonPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_json_recognizes_regex_marker() {
        let pattern = JsonPattern::from_json(json!({"id": 4, "token": {"$regex": ".+"}})).unwrap();
        let expected = JsonPattern::object([
            ("id", JsonPattern::from(4_i64)),
            ("token", JsonPattern::regex(".+").unwrap()),
        ]);
        assert_eq!(pattern, expected);
    }

    #[test]
    fn test_marker_with_extra_keys_is_literal() {
        let pattern =
            JsonPattern::from_json(json!({"$regex": ".+", "other": 1})).unwrap();
        assert!(matches!(pattern, JsonPattern::Object(ref m) if m.len() == 2));
    }

    #[test]
    fn test_invalid_regex_is_invalid_spec() {
        let result = JsonPattern::from_json(json!({"name": {"$regex": "("}}));
        assert!(matches!(result, Err(DomainError::InvalidSpec(_))));
    }

    #[test]
    fn test_literal_conversion_keeps_marker_objects() {
        let pattern = JsonPattern::from(json!({"$regex": ".+"}));
        assert!(matches!(pattern, JsonPattern::Object(_)));
    }

    #[test]
    fn test_to_json_round_trips() {
        let source = json!({"data": [{"id": 1}, {"name": {"$regex": "^J"}}], "ok": true});
        let pattern = JsonPattern::from_json(source.clone()).unwrap();
        assert_eq!(pattern.to_json(), source);
    }

    #[test]
    fn test_display() {
        assert_eq!(JsonPattern::regex("\\d+").unwrap().to_string(), "/\\d+/");
        assert_eq!(JsonPattern::from(json!({"a": 1})).to_string(), r#"{"a":1}"#);
    }
}
