//! Default request settings shared by every spec.
//!
//! A [`DefaultConfig`] is created once during setup, adjusted through its
//! setters, and then only borrowed by [`SpecBuilder`](crate::spec::SpecBuilder)
//! which copies what it needs at creation time.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::{Header, Headers};

/// Timeout applied when none was configured, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Process-wide defaults inherited by new specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultConfig {
    headers: Headers,
    timeout_ms: u64,
}

impl DefaultConfig {
    /// Creates a config with no default headers and [`DEFAULT_TIMEOUT_MS`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headers: Headers::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Replaces the default header mapping.
    ///
    /// The previous defaults are discarded, not merged.
    pub fn set_default_headers<K, V>(&mut self, headers: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = headers
            .into_iter()
            .map(|(name, value)| Header::new(name, value))
            .collect();
    }

    /// Replaces the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfig`] if `timeout_ms` is negative.
    pub fn set_default_timeout(&mut self, timeout_ms: i64) -> DomainResult<()> {
        self.timeout_ms = u64::try_from(timeout_ms).map_err(|_| {
            DomainError::invalid_config(format!(
                "timeout must be a non-negative number of milliseconds, got {timeout_ms}"
            ))
        })?;
        Ok(())
    }

    /// Returns the default headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the default timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DefaultConfig::new();
        assert!(config.headers().is_empty());
        assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_set_default_headers_replaces() {
        let mut config = DefaultConfig::new();
        config.set_default_headers([("x-api-key", "k"), ("accept", "application/json")]);
        config.set_default_headers([("x-trace", "1")]);

        assert_eq!(config.headers().len(), 1);
        assert_eq!(config.headers().get("X-Trace"), Some("1"));
        assert_eq!(config.headers().get("x-api-key"), None);
    }

    #[test]
    fn test_set_default_timeout() {
        let mut config = DefaultConfig::new();
        config.set_default_timeout(30_000).unwrap();
        assert_eq!(config.timeout_ms(), 30_000);

        config.set_default_timeout(0).unwrap();
        assert_eq!(config.timeout_ms(), 0);
    }

    #[test]
    fn test_negative_timeout_is_rejected() {
        let mut config = DefaultConfig::new();
        let result = config.set_default_timeout(-1);

        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
        assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }
}
