//! Data model: input records, result records, metadata projection, run stats.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One input item: named scalar fields in their native order.
///
/// `serde_json::Map` is order-preserving here (the crate is built with the
/// `preserve_order` feature), which makes rendering deterministic.
pub type Record = Map<String, Value>;

/// One successfully embedded record, as persisted in the output artifact.
///
/// `id` is the 0-based position among *attempted* records, so skips leave
/// gaps rather than renumbering the survivors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: usize,
    pub text: String,
    pub vector: Vec<f32>,
    pub metadata: Map<String, Value>,
}

/// One entry of the metadata projection: output key and the source field it
/// reads from a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataField {
    pub key: String,
    pub source: String,
}

impl MetadataField {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// The stock projection for well-production datasets.
pub fn default_metadata_fields() -> Vec<MetadataField> {
    vec![
        MetadataField::new("year", "Production Year"),
        MetadataField::new("operator", "Operator"),
        MetadataField::new("county", "County"),
    ]
}

/// Applies a projection to one record.
///
/// Output keys follow the projection order; source fields absent from the
/// record project to `null`.
pub fn project_metadata(record: &Record, fields: &[MetadataField]) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        let value = record.get(&field.source).cloned().unwrap_or(Value::Null);
        out.insert(field.key.clone(), value);
    }
    out
}

/// Why an attempted record produced no [`ResultRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record rendered to an empty string.
    EmptyText,
    /// The provider answered with an empty vector.
    EmptyVector,
    /// The remote call failed; the message carries the cause.
    Embedding(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyText => write!(f, "empty after cleaning"),
            SkipReason::EmptyVector => write!(f, "embedding returned no vector"),
            SkipReason::Embedding(msg) => write!(f, "embedding failed: {msg}"),
        }
    }
}

/// Summary statistics for one full pipeline run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub embedded: usize,
    pub skipped: usize,
    pub duration_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn projection_maps_absent_fields_to_null() {
        let rec = record(json!({
            "Production Year": 2018,
            "County": "Kern"
        }));
        let meta = project_metadata(&rec, &default_metadata_fields());

        assert_eq!(meta.get("year"), Some(&json!(2018)));
        assert_eq!(meta.get("operator"), Some(&Value::Null));
        assert_eq!(meta.get("county"), Some(&json!("Kern")));
    }

    #[test]
    fn projection_follows_configured_order() {
        let rec = record(json!({ "a": 1, "b": 2 }));
        let fields = vec![
            MetadataField::new("second", "b"),
            MetadataField::new("first", "a"),
        ];
        let meta = project_metadata(&rec, &fields);
        let keys: Vec<&String> = meta.keys().collect();
        assert_eq!(keys, ["second", "first"]);
    }

    #[test]
    fn skip_reason_reads_well_in_logs() {
        assert_eq!(SkipReason::EmptyText.to_string(), "empty after cleaning");
        assert_eq!(
            SkipReason::Embedding("HTTP 429".into()).to_string(),
            "embedding failed: HTTP 429"
        );
    }
}
