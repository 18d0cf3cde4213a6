//! HTTP Request domain types

mod body;
mod header;
mod method;
mod query;
mod spec;

pub use body::{JSON_CONTENT_TYPE, RequestBody};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams, query_value_text};
pub use spec::RequestSpec;
