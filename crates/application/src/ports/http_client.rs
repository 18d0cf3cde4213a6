//! HTTP Client port

use std::fmt;
use std::future::Future;

use assay_domain::{CapturedResponse, ErrorKind, RequestSpec};
use thiserror::Error;

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Sends the request and buffers the full response.
    ///
    /// Implementations must give up once `request.timeout_ms()` has passed
    /// and report [`HttpClientError::Timeout`]. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or a body that cannot be encoded.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<CapturedResponse, HttpClientError>> + Send;
}

/// Transport failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorKind {
    /// Host name could not be resolved.
    Dns,
    /// The server refused the connection.
    ConnectionRefused,
    /// TLS handshake or certificate failure.
    Tls,
    /// Connection could not be established or was dropped.
    Connect,
    /// Anything else.
    Other,
}

impl NetworkErrorKind {
    /// Maps this category onto the spec lifecycle error kind.
    #[must_use]
    pub const fn to_error_kind(self) -> ErrorKind {
        match self {
            Self::Dns => ErrorKind::Dns,
            Self::ConnectionRefused => ErrorKind::ConnectionRefused,
            Self::Tls => ErrorKind::Tls,
            Self::Connect => ErrorKind::Connect,
            Self::Other => ErrorKind::Network,
        }
    }
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dns => "dns",
            Self::ConnectionRefused => "connection refused",
            Self::Tls => "tls",
            Self::Connect => "connect",
            Self::Other => "other",
        })
    }
}

/// Errors reported by an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// No complete response within the timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that expired.
        timeout_ms: u64,
    },

    /// Transport failure.
    #[error("network error ({kind}): {message}")]
    Network {
        /// Failure category.
        kind: NetworkErrorKind,
        /// Underlying error text.
        message: String,
    },

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request could not be assembled, e.g. a malformed header.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpClientError {
    /// Creates a network error.
    #[must_use]
    pub fn network(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self::Network {
            kind,
            message: message.into(),
        }
    }

    /// Maps this error onto the spec lifecycle error kind.
    #[must_use]
    pub const fn to_error_kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network { kind, .. } => kind.to_error_kind(),
            Self::InvalidBody(_) | Self::InvalidRequest(_) => ErrorKind::InvalidSpec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: 10 }.to_error_kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            HttpClientError::network(NetworkErrorKind::Dns, "no such host").to_error_kind(),
            ErrorKind::Dns
        );
        assert_eq!(
            HttpClientError::network(NetworkErrorKind::Other, "reset").to_error_kind(),
            ErrorKind::Network
        );
        assert_eq!(
            HttpClientError::InvalidRequest("invalid HTTP header name".into()).to_error_kind(),
            ErrorKind::InvalidSpec
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: 250 }.to_string(),
            "request timed out after 250ms"
        );
        assert_eq!(
            HttpClientError::network(NetworkErrorKind::ConnectionRefused, "port 1").to_string(),
            "network error (connection refused): port 1"
        );
    }
}
