//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while configuring defaults or describing a spec.
///
/// Both variants are produced before any network activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A default configuration value was rejected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A spec was malformed or described contradictory settings.
    #[error("invalid spec: {0}")]
    InvalidSpec(String),
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidSpec`] error.
    #[must_use]
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec(message.into())
    }

    /// Shorthand for an [`DomainError::InvalidConfig`] error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
