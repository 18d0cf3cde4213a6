//! Assertion engine.
//!
//! Pure functions that compare a captured response with expectations. Each
//! checker returns a [`MatchResult`](assay_domain::MatchResult) listing every
//! divergence it found.

mod engine;
mod json_like;
mod schema;

pub use engine::{
    check_header, check_response_time, check_status, evaluate, evaluate_all,
};
pub use json_like::match_json_like;
pub use schema::match_schema;
