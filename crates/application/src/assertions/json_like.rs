//! Partial JSON matching.
//!
//! Walks a [`JsonPattern`] alongside the actual value and collects every
//! divergence with its location. Object members the pattern does not mention
//! are ignored.

use assay_domain::testing::kind_name;
use assay_domain::{JsonPath, JsonPattern, MatchResult, Mismatch, PathSegment};
use serde_json::{Number, Value};

/// Checks that `actual` contains `pattern`.
#[must_use]
pub fn match_json_like(actual: &Value, pattern: &JsonPattern) -> MatchResult {
    let mut path = Vec::new();
    let mut mismatches = Vec::new();
    walk(actual, pattern, &mut path, &mut mismatches);
    MatchResult::from_mismatches(mismatches)
}

fn walk(
    actual: &Value,
    pattern: &JsonPattern,
    path: &mut Vec<PathSegment>,
    out: &mut Vec<Mismatch>,
) {
    match (pattern, actual) {
        (JsonPattern::Regex(re), value) => {
            let text = value_text(value);
            if !re.is_match(&text) {
                record(path, out, format!("expected value matching /{}/, got {value}", re.as_str()));
            }
        }

        (JsonPattern::Object(members), Value::Object(map)) => {
            for (key, sub) in members {
                path.push(PathSegment::Key(key.clone()));
                match map.get(key) {
                    Some(value) => walk(value, sub, path, out),
                    None => record(path, out, format!("missing key '{key}'")),
                }
                path.pop();
            }
        }

        (JsonPattern::Array(elements), Value::Array(items)) => {
            if elements.len() != items.len() {
                record(
                    path,
                    out,
                    format!(
                        "expected array of length {}, got length {}",
                        elements.len(),
                        items.len()
                    ),
                );
            }
            for (index, (sub, value)) in elements.iter().zip(items).enumerate() {
                path.push(PathSegment::Index(index));
                walk(value, sub, path, out);
                path.pop();
            }
        }

        (JsonPattern::Number(expected), Value::Number(got)) => {
            if !numbers_equal(expected, got) {
                record(path, out, format!("expected {expected}, got {got}"));
            }
        }

        (JsonPattern::String(expected), Value::String(got)) => {
            if expected != got {
                record(path, out, format!("expected \"{expected}\", got \"{got}\""));
            }
        }

        (JsonPattern::Bool(expected), Value::Bool(got)) => {
            if expected != got {
                record(path, out, format!("expected {expected}, got {got}"));
            }
        }

        (JsonPattern::Null, Value::Null) => {}

        (expected, got) => record(
            path,
            out,
            format!("expected {}, got {}", pattern_kind(expected), kind_name(got)),
        ),
    }
}

fn record(path: &[PathSegment], out: &mut Vec<Mismatch>, message: String) {
    out.push(Mismatch::new(JsonPath::from(path.to_vec()), message));
}

/// Text a regex leaf is matched against.
///
/// Strings are used verbatim; everything else is compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[allow(clippy::float_cmp)]
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

const fn pattern_kind(pattern: &JsonPattern) -> &'static str {
    match pattern {
        JsonPattern::Null => "null",
        JsonPattern::Bool(_) => "boolean",
        JsonPattern::Number(_) => "number",
        JsonPattern::String(_) => "string",
        JsonPattern::Regex(_) => "pattern",
        JsonPattern::Array(_) => "array",
        JsonPattern::Object(_) => "object",
    }
}
