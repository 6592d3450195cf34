//! Record-to-text rendering.

use serde_json::Value;

use crate::record::Record;

/// Renders one record into the canonical embedding text.
///
/// Pure function, no failure mode: the worst case is an empty string, which
/// callers treat as "skip this record".
///
/// Policy:
/// - keys have `_` replaced by spaces, values have embedded newlines replaced
///   by spaces
/// - a field is skipped when its value is null, non-scalar, or trims to empty
/// - surviving `"key: value"` fragments join with `" | "` in the record's
///   native field order
pub fn record_to_text(record: &Record) -> String {
    let mut parts = Vec::new();

    for (key, value) in record {
        let Some(raw) = scalar_to_string(value) else {
            continue;
        };
        if raw.trim().is_empty() {
            continue;
        }

        let clean_key = key.replace('_', " ");
        let clean_value = raw.replace('\n', " ");
        parts.push(format!("{clean_key}: {clean_value}"));
    }

    parts.join(" | ")
}

/// Scalar display form, `None` for null and structured values.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn renders_one_fragment_per_non_empty_field() {
        let rec = record(json!({ "a": "x", "b": null }));
        assert_eq!(record_to_text(&rec), "a: x");
    }

    #[test]
    fn all_null_fields_render_empty() {
        let rec = record(json!({ "a": null }));
        assert_eq!(record_to_text(&rec), "");
    }

    #[test]
    fn fragments_follow_native_field_order() {
        let rec = record(json!({ "Well Name": "Alpha", "County": "Kern", "API": 123 }));
        assert_eq!(
            record_to_text(&rec),
            "Well Name: Alpha | County: Kern | API: 123"
        );
    }

    #[test]
    fn keys_lose_underscores_and_values_lose_newlines() {
        let rec = record(json!({ "field_name": "line one\nline two" }));
        assert_eq!(record_to_text(&rec), "field name: line one line two");
    }

    #[test]
    fn blank_and_structured_values_are_skipped() {
        let rec = record(json!({
            "blank": "   ",
            "list": [1, 2],
            "nested": { "x": 1 },
            "kept": "v"
        }));
        assert_eq!(record_to_text(&rec), "kept: v");
    }

    #[test]
    fn numbers_and_bools_render_canonically() {
        let rec = record(json!({ "year": 2018, "rate": 3.5, "active": true }));
        assert_eq!(record_to_text(&rec), "year: 2018 | rate: 3.5 | active: true");
    }

    #[test]
    fn rendering_is_pure() {
        let rec = record(json!({ "a": "x", "b": 1 }));
        let first = record_to_text(&rec);
        let second = record_to_text(&rec);
        assert_eq!(first, second);
    }
}
