//! Expectations attached to a spec.

use serde::Serialize;

use super::pattern::JsonPattern;
use super::schema::JsonSchema;

/// One property the response must have for the spec to pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Status code equals the given integer.
    StatusEquals {
        /// Expected status code.
        code: u16,
    },
    /// JSON body contains the pattern (subset match).
    JsonLike {
        /// Pattern the body must contain.
        pattern: JsonPattern,
    },
    /// JSON body conforms to the schema.
    JsonSchema {
        /// Schema the body must satisfy.
        schema: JsonSchema,
    },
    /// Header exists with exactly this value.
    HeaderEquals {
        /// Header name (case-insensitive).
        name: String,
        /// Expected value.
        value: String,
    },
    /// Response was fully received within the limit, inclusive.
    ResponseTimeWithin {
        /// Maximum allowed time in milliseconds.
        max_ms: u64,
    },
}

impl Expectation {
    /// Short label for the kind of expectation.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::StatusEquals { .. } => "status",
            Self::JsonLike { .. } => "json-like",
            Self::JsonSchema { .. } => "json-schema",
            Self::HeaderEquals { .. } => "header",
            Self::ResponseTimeWithin { .. } => "response-time",
        }
    }

    /// Get a human-readable description of this expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusEquals { code } => format!("Status code = {code}"),
            Self::JsonLike { pattern } => format!("JSON like {pattern}"),
            Self::JsonSchema { .. } => "JSON matches schema".to_string(),
            Self::HeaderEquals { name, value } => format!("Header '{name}' equals '{value}'"),
            Self::ResponseTimeWithin { max_ms } => format!("Response time <= {max_ms}ms"),
        }
    }
}
