//! Query parameter types

use serde::{Deserialize, Serialize};

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A collection of query parameters with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets a parameter, replacing the value of an existing key.
    pub fn set(&mut self, param: QueryParam) {
        match self.items.iter_mut().find(|p| p.key == param.key) {
            Some(existing) => existing.value = param.value,
            None => self.items.push(param),
        }
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Returns an iterator over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryParam> {
        self.items.iter()
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        let mut params = Self::new();
        for param in iter {
            params.set(param);
        }
        params
    }
}

/// Renders a JSON value as query parameter text.
///
/// Strings are used verbatim so `"2"` and `2` both become `2`.
#[must_use]
pub fn query_value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_query_param_creation() {
        let param = QueryParam::new("page", "1");
        assert_eq!(param.key, "page");
        assert_eq!(param.value, "1");
    }

    #[test]
    fn test_set_replaces_existing_key() {
        let mut params = QueryParams::new();
        params.set(QueryParam::new("page", "1"));
        params.set(QueryParam::new("limit", "10"));
        params.set(QueryParam::new("page", "2"));

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("page"), Some("2"));
        let keys: Vec<_> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["page", "limit"]);
    }

    #[test]
    fn test_query_value_text() {
        assert_eq!(query_value_text(&json!(2)), "2");
        assert_eq!(query_value_text(&json!("abc")), "abc");
        assert_eq!(query_value_text(&json!(true)), "true");
    }
}
