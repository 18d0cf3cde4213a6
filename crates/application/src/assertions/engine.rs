//! Dispatch from expectations to checkers.

use assay_domain::{CapturedResponse, Expectation, JsonPath, MatchResult};

use super::json_like::match_json_like;
use super::schema::match_schema;

/// Evaluates every expectation in declaration order.
#[must_use]
pub fn evaluate_all(
    expectations: &[Expectation],
    response: &CapturedResponse,
) -> Vec<(Expectation, MatchResult)> {
    expectations
        .iter()
        .map(|expectation| (expectation.clone(), evaluate(expectation, response)))
        .collect()
}

/// Evaluates one expectation against a response.
#[must_use]
pub fn evaluate(expectation: &Expectation, response: &CapturedResponse) -> MatchResult {
    match expectation {
        Expectation::StatusEquals { code } => check_status(*code, response),
        Expectation::JsonLike { pattern } => match response.json() {
            Some(body) => match_json_like(body, pattern),
            None => not_json(response),
        },
        Expectation::JsonSchema { schema } => match response.json() {
            Some(body) => match_schema(body, schema),
            None => not_json(response),
        },
        Expectation::HeaderEquals { name, value } => check_header(name, value, response),
        Expectation::ResponseTimeWithin { max_ms } => check_response_time(*max_ms, response),
    }
}

/// Status code must equal `expected`.
#[must_use]
pub fn check_status(expected: u16, response: &CapturedResponse) -> MatchResult {
    let actual = response.status();
    if actual == expected {
        MatchResult::pass()
    } else {
        MatchResult::fail(
            JsonPath::root(),
            format!("expected status {expected}, got {actual}"),
        )
    }
}

/// Header `name` (any case) must be present with exactly `expected`.
#[must_use]
pub fn check_header(name: &str, expected: &str, response: &CapturedResponse) -> MatchResult {
    match response.header(name) {
        Some(actual) if actual == expected => MatchResult::pass(),
        Some(actual) => MatchResult::fail(
            JsonPath::root(),
            format!("header '{name}': expected '{expected}', got '{actual}'"),
        ),
        None => MatchResult::fail(JsonPath::root(), format!("header '{name}' not found")),
    }
}

/// The full response must have arrived within `max_ms`.
#[must_use]
pub fn check_response_time(max_ms: u64, response: &CapturedResponse) -> MatchResult {
    let actual_ms = response.elapsed_ms();
    if actual_ms <= max_ms {
        MatchResult::pass()
    } else {
        MatchResult::fail(
            JsonPath::root(),
            format!("response took {actual_ms}ms, expected <= {max_ms}ms"),
        )
    }
}

fn not_json(response: &CapturedResponse) -> MatchResult {
    let message = if response.body().is_empty() {
        "response body is empty, expected JSON".to_string()
    } else {
        format!(
            "response body is not JSON (content type: {})",
            response.content_type().unwrap_or("none")
        )
    };
    MatchResult::fail(JsonPath::root(), message)
}
