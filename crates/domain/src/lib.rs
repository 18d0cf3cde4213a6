//! Assay Domain - Core contract-testing types
//!
//! This crate defines the spec model: default configuration, the spec
//! builder, requests, captured responses and expectations.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub(crate) mod encoding;
pub mod error;
pub mod request;
pub mod response;
pub mod spec;
pub mod state;
pub mod status;
pub mod testing;

pub use config::{DEFAULT_TIMEOUT_MS, DefaultConfig};
pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec};
pub use response::CapturedResponse;
pub use spec::{Spec, SpecBuilder};
pub use state::{ErrorKind, SpecState};
pub use testing::{
    Expectation, JsonPath, JsonPattern, JsonSchema, MatchResult, Mismatch, PathSegment,
    SchemaType,
};
