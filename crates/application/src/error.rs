//! Application error types

use std::fmt;

use assay_domain::{DomainError, ErrorKind, Expectation, MatchResult, SpecState};
use thiserror::Error;

use crate::ports::{HttpClientError, NetworkErrorKind};

/// Why a spec did not produce a passing response.
#[derive(Debug, Clone, Error)]
pub enum SpecError {
    /// The default configuration was invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The spec was described incorrectly.
    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    /// Transport failure before a response was received.
    #[error("network error ({kind}): {message}")]
    Network {
        /// Failure category.
        kind: NetworkErrorKind,
        /// Underlying error text.
        message: String,
    },

    /// No complete response within the timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that expired.
        timeout_ms: u64,
    },

    /// A response was received but expectations did not hold.
    #[error("{0}")]
    AssertionFailure(AssertionFailure),
}

impl SpecError {
    /// Terminal lifecycle state corresponding to this error.
    #[must_use]
    pub fn to_spec_state(&self) -> SpecState {
        match self {
            Self::InvalidConfig(message) => SpecState::errored(ErrorKind::InvalidConfig, message),
            Self::InvalidSpec(message) => SpecState::errored(ErrorKind::InvalidSpec, message),
            Self::Network { kind, .. } => SpecState::errored(kind.to_error_kind(), self.to_string()),
            Self::Timeout { .. } => SpecState::errored(ErrorKind::Timeout, self.to_string()),
            Self::AssertionFailure(failure) => SpecState::failed(failure.reasons()),
        }
    }

    /// Returns the assertion failure, if that is what this is.
    #[must_use]
    pub const fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::AssertionFailure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<DomainError> for SpecError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidConfig(message) => Self::InvalidConfig(message),
            DomainError::InvalidSpec(message) => Self::InvalidSpec(message),
        }
    }
}

impl From<HttpClientError> for SpecError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::Timeout { timeout_ms } => Self::Timeout { timeout_ms },
            HttpClientError::Network { kind, message } => Self::Network { kind, message },
            HttpClientError::InvalidBody(message) | HttpClientError::InvalidRequest(message) => {
                Self::InvalidSpec(message)
            }
        }
    }
}

impl From<AssertionFailure> for SpecError {
    fn from(failure: AssertionFailure) -> Self {
        Self::AssertionFailure(failure)
    }
}

/// Every expectation that did not hold, with its result.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFailure {
    failures: Vec<(Expectation, MatchResult)>,
}

impl AssertionFailure {
    /// Wraps failing expectation/result pairs.
    #[must_use]
    pub const fn new(failures: Vec<(Expectation, MatchResult)>) -> Self {
        Self { failures }
    }

    /// Failing pairs in declaration order.
    #[must_use]
    pub fn failures(&self) -> &[(Expectation, MatchResult)] {
        &self.failures
    }

    /// One line per failing expectation.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|(expectation, result)| failure_line(expectation, result))
            .collect()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} expectation(s) failed", self.failures.len())?;
        for reason in self.reasons() {
            write!(f, "\n  - {reason}")?;
        }
        Ok(())
    }
}

pub(crate) fn failure_line(expectation: &Expectation, result: &MatchResult) -> String {
    let details = result
        .mismatches()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{}: {details}", expectation.description())
}
