//! Spec lifecycle.
//!
//! A spec moves `Built -> Sent -> Passed | Failed | Errored`. The last three
//! are terminal. Specs that never reach the network (invalid config or spec)
//! go straight from `Built` to `Errored`.

use serde::{Deserialize, Serialize};

/// Where a spec is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SpecState {
    /// Fully described, nothing sent yet.
    #[default]
    Built,

    /// Request dispatched, response pending.
    Sent,

    /// Response received and every expectation held.
    Passed,

    /// Response received but at least one expectation did not hold.
    Failed {
        /// One line per failing expectation.
        reasons: Vec<String>,
    },

    /// No usable response could be obtained.
    Errored {
        /// Error category.
        kind: ErrorKind,
        /// Human-readable cause.
        message: String,
    },
}

impl SpecState {
    /// Creates a Failed state.
    #[must_use]
    pub const fn failed(reasons: Vec<String>) -> Self {
        Self::Failed { reasons }
    }

    /// Creates an Errored state.
    #[must_use]
    pub fn errored(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Errored {
            kind,
            message: message.into(),
        }
    }

    /// Returns true once the spec can no longer change state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Passed | Self::Failed { .. } | Self::Errored { .. }
        )
    }

    /// Returns true if every expectation held.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true if an expectation did not hold.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true if the spec errored before assertions could run.
    #[must_use]
    pub const fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }

    /// Returns the error kind if errored.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Errored { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Short label for logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Sent => "sent",
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Errored { .. } => "errored",
        }
    }
}

/// Categories of spec errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad default configuration.
    InvalidConfig,

    /// Bad spec description.
    InvalidSpec,

    /// DNS resolution failed.
    Dns,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Connection could not be established or was dropped.
    Connect,

    /// TLS handshake or certificate error.
    Tls,

    /// Other transport failure.
    Network,

    /// No complete response within the timeout.
    Timeout,
}

impl ErrorKind {
    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "Invalid Configuration",
            Self::InvalidSpec => "Invalid Spec",
            Self::Dns => "DNS Resolution Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Connect => "Connection Failed",
            Self::Tls => "SSL/TLS Error",
            Self::Network => "Network Error",
            Self::Timeout => "Request Timeout",
        }
    }

    /// Returns true for transport failures.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Dns | Self::ConnectionRefused | Self::Connect | Self::Tls | Self::Network
        )
    }
}
