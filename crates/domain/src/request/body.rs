//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// Content type sent with JSON bodies unless a header overrides it.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// A JSON document, serialized at send time.
    Json {
        /// The document to send.
        value: serde_json::Value,
    },
    /// Raw bytes sent verbatim.
    Raw {
        /// The content type (e.g., "text/plain")
        content_type: String,
        /// The body content
        #[serde(with = "crate::encoding::base64_bytes")]
        content: Vec<u8>,
    },
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json { value }
    }

    /// Creates a raw body with an explicit content type.
    #[must_use]
    pub fn raw(content_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::Raw {
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::raw("text/plain", content.into().into_bytes())
    }

    /// Returns the content type implied by the body.
    #[must_use]
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json { .. } => JSON_CONTENT_TYPE,
            Self::Raw { content_type, .. } => content_type,
        }
    }

    /// Returns the JSON document if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json { value } => Some(value),
            Self::Raw { .. } => None,
        }
    }
}
