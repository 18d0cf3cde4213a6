//! Schema conformance.

use assay_domain::testing::kind_name;
use assay_domain::{JsonPath, JsonSchema, MatchResult, Mismatch, PathSegment};
use serde_json::Value;

/// Checks that `actual` conforms to `schema`, depth first.
#[must_use]
pub fn match_schema(actual: &Value, schema: &JsonSchema) -> MatchResult {
    let mut path = Vec::new();
    let mut mismatches = Vec::new();
    validate(actual, schema, &mut path, &mut mismatches);
    MatchResult::from_mismatches(mismatches)
}

fn validate(
    value: &Value,
    schema: &JsonSchema,
    path: &mut Vec<PathSegment>,
    out: &mut Vec<Mismatch>,
) {
    if !schema.accepts_type(value) {
        let expected = schema
            .types()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" or ");
        out.push(Mismatch::new(
            JsonPath::from(path.clone()),
            format!("expected type {expected}, got {}", kind_name(value)),
        ));
        return;
    }

    match value {
        Value::Object(map) => {
            for name in schema.required() {
                if !map.contains_key(name) {
                    path.push(PathSegment::Key(name.clone()));
                    out.push(Mismatch::new(
                        JsonPath::from(path.clone()),
                        format!("missing required property '{name}'"),
                    ));
                    path.pop();
                }
            }
            for (name, sub) in schema.properties() {
                if let Some(member) = map.get(name) {
                    path.push(PathSegment::Key(name.clone()));
                    validate(member, sub, path, out);
                    path.pop();
                }
            }
        }
        Value::Array(elements) => {
            if let Some(items) = schema.items() {
                for (index, element) in elements.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    validate(element, items, path, out);
                    path.pop();
                }
            }
        }
        _ => {}
    }
}
