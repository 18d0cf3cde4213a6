//! Response expectations and match results.
//!
//! Types describing what a response must look like. The checkers that
//! evaluate them live in the application layer.

mod expectation;
mod path;
mod pattern;
mod result;
mod schema;

pub use expectation::Expectation;
pub use path::{JsonPath, PathSegment};
pub use pattern::{JsonPattern, REGEX_MARKER};
pub use result::{MatchResult, Mismatch};
pub use schema::{JsonSchema, SchemaType, kind_name};
