//! Input loading, repair, and cleanup.
//!
//! Provides three utilities:
//! - [`parse_records`] → strict JSON parse with one trailing-comma repair retry.
//! - [`load_records_from_path`] → file convenience wrapper around the above.
//! - [`clean_json_file`] → literal `NaN` → `null` replacement with validation.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::PipelineError;
use crate::record::Record;

static TRAILING_COMMA: OnceLock<Regex> = OnceLock::new();

/// Strips trailing commas before a closing brace or bracket.
///
/// This is the one named repair strategy the loader applies, and it is
/// best-effort: the replacement is textual, so a string value that happens to
/// contain `",}"` or `",]"` would be altered too. Callers must treat repaired
/// input as recovered data, not as ground truth.
pub fn strip_trailing_commas(content: &str) -> String {
    let re = TRAILING_COMMA.get_or_init(|| Regex::new(r",\s*([}\]])").expect("static pattern"));
    re.replace_all(content, "$1").into_owned()
}

/// Parses serialized input into an ordered sequence of records.
///
/// Accepted top-level shapes: a JSON array of objects, or a single object
/// (loaded as one record). On a parse failure the content is repaired once
/// via [`strip_trailing_commas`] and retried exactly once.
///
/// # Errors
/// [`PipelineError::MalformedInput`] when the content cannot be parsed even
/// after repair, or parses to something other than records.
pub fn parse_records(content: &str) -> Result<Vec<Record>, PipelineError> {
    match try_parse(content) {
        Ok(records) => {
            debug!(count = records.len(), "parsed records on first attempt");
            Ok(records)
        }
        Err(first) => {
            warn!(error = %first, "strict parse failed; retrying after trailing-comma repair");
            let repaired = strip_trailing_commas(content);
            let records = try_parse(&repaired)?;
            info!(count = records.len(), "repair succeeded; treat recovered data as best-effort");
            Ok(records)
        }
    }
}

/// Reads a file and parses it via [`parse_records`].
///
/// # Errors
/// [`PipelineError::Io`] if the file cannot be read, otherwise as
/// [`parse_records`].
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<Vec<Record>, PipelineError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading records");
    let content = fs::read_to_string(path)?;
    parse_records(&content)
}

fn try_parse(content: &str) -> Result<Vec<Record>, PipelineError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| PipelineError::MalformedInput(e.to_string()))?;
    records_from_value(value)
}

fn records_from_value(value: Value) -> Result<Vec<Record>, PipelineError> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(map) => out.push(map),
                    other => {
                        return Err(PipelineError::MalformedInput(format!(
                            "array element {i} is not an object (found {})",
                            kind_of(&other)
                        )));
                    }
                }
            }
            Ok(out)
        }
        Value::Object(map) => Ok(vec![map]),
        other => Err(PipelineError::MalformedInput(format!(
            "expected an array of objects or a single object (found {})",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Replaces literal `NaN` tokens with `null`.
///
/// Same caveat as the comma repair: the replacement is textual and would also
/// hit a string value containing `NaN`.
pub fn scrub_nan_literals(content: &str) -> String {
    content.replace("NaN", "null")
}

/// File-to-file cleanup: scrub `NaN` literals, validate, then write.
///
/// Validation happens *before* the write — an output file is only produced
/// when the cleaned content is valid JSON. Returns the number of replaced
/// occurrences.
///
/// # Errors
/// - [`PipelineError::Io`] on read/write failures.
/// - [`PipelineError::MalformedInput`] if the content is still invalid after
///   the replacement (nothing is written).
pub fn clean_json_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<usize, PipelineError> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(input = %input.display(), "cleaning NaN literals");
    let raw = fs::read_to_string(input)?;
    let occurrences = raw.matches("NaN").count();
    let cleaned = scrub_nan_literals(&raw);

    if let Err(e) = serde_json::from_str::<Value>(&cleaned) {
        return Err(PipelineError::MalformedInput(format!(
            "content is not valid JSON after NaN cleanup: {e}"
        )));
    }

    fs::write(output, cleaned)?;
    info!(
        replaced = occurrences,
        output = %output.display(),
        "cleanup complete"
    );
    Ok(occurrences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_array() {
        let records = parse_records(r#"[{"a": "x"}, {"b": 2}]"#).expect("parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some(&json!("x")));
        assert_eq!(records[1].get("b"), Some(&json!(2)));
    }

    #[test]
    fn single_object_with_trailing_comma_loads_as_one_record() {
        let records = parse_records(r#"{"a":1,}"#).expect("repairs and parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!(1)));
    }

    #[test]
    fn array_with_trailing_commas_is_repaired() {
        let content = "[\n  {\"a\": 1,\n},\n]";
        let records = parse_records(content).expect("repairs and parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&json!(1)));
    }

    #[test]
    fn unrepairable_content_is_fatal() {
        let err = parse_records(r#"[{"a": }]"#).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn non_object_elements_are_rejected() {
        let err = parse_records(r#"[{"a": 1}, 42]"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("element 1"), "unexpected message: {msg}");
    }

    #[test]
    fn scalar_top_level_is_rejected() {
        assert!(parse_records("\"just a string\"").is_err());
        assert!(parse_records("42").is_err());
    }

    #[test]
    fn repair_leaves_valid_content_alone() {
        let content = r#"[{"a": "x,]"}]"#;
        let records = parse_records(content).expect("parses strictly");
        assert_eq!(records[0].get("a"), Some(&json!("x,]")));
    }

    #[test]
    fn nan_literals_become_null() {
        let cleaned = scrub_nan_literals(r#"[{"a": NaN, "b": 1}]"#);
        let records = parse_records(&cleaned).expect("valid after scrub");
        assert_eq!(records[0].get("a"), Some(&Value::Null));
        assert_eq!(records[0].get("b"), Some(&json!(1)));
    }
}
