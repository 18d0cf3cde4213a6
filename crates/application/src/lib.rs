//! Assay Application - Assertion engine and spec runner
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The assertion engine comparing responses with expectations
//! - The spec runner driving a spec to its terminal state

pub mod assertions;
pub mod error;
pub mod ports;
pub mod run_spec;

pub use error::{AssertionFailure, SpecError};
pub use ports::{Clock, HttpClient, HttpClientError, NetworkErrorKind};
pub use run_spec::{SpecReport, SpecRunner};
