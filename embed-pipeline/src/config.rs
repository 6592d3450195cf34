//! Runtime configuration for pipeline runs.

use std::time::Duration;

use tracing::warn;

use crate::errors::PipelineError;
use crate::record::{MetadataField, default_metadata_fields};

/// Configuration for one embedding run. All fields have defaults via
/// [`PipelineConfig::from_env`]; tests and callers can also build it directly.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Maximum records to process per run.
    pub record_limit: usize,
    /// Maximum characters sent per embedding request (prefix truncation).
    pub max_embed_chars: usize,
    /// Pause after every N-th attempted record.
    pub pace_every: usize,
    /// Length of the pacing pause.
    pub pace_delay: Duration,
    /// Report progress after every N-th attempted record.
    pub progress_every: usize,
    /// Metadata projection applied to each embedded record.
    pub metadata_fields: Vec<MetadataField>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            record_limit: 10_000,
            max_embed_chars: 20_000,
            pace_every: 10,
            pace_delay: Duration::from_millis(1_000),
            progress_every: 100,
            metadata_fields: default_metadata_fields(),
        }
    }
}

impl PipelineConfig {
    /// Build from environment variables with the stock defaults.
    ///
    /// # Environment variables
    /// - `RECORD_LIMIT`    (default 10000)
    /// - `MAX_EMBED_CHARS` (default 20000)
    /// - `PACE_EVERY`      (default 10)
    /// - `PACE_DELAY_MS`   (default 1000)
    /// - `PROGRESS_EVERY`  (default 100)
    /// - `METADATA_FIELDS` (default `year=Production Year,operator=Operator,county=County`)
    pub fn from_env() -> Self {
        let dflt = Self::default();
        let metadata_fields = match std::env::var("METADATA_FIELDS") {
            Ok(raw) if !raw.trim().is_empty() => parse_metadata_fields(&raw),
            _ => dflt.metadata_fields,
        };

        Self {
            record_limit: parse("RECORD_LIMIT", dflt.record_limit),
            max_embed_chars: parse("MAX_EMBED_CHARS", dflt.max_embed_chars),
            pace_every: parse("PACE_EVERY", dflt.pace_every),
            pace_delay: Duration::from_millis(parse(
                "PACE_DELAY_MS",
                dflt.pace_delay.as_millis() as u64,
            )),
            progress_every: parse("PROGRESS_EVERY", dflt.progress_every),
            metadata_fields,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.record_limit == 0 {
            return Err(PipelineError::Config("record_limit must be > 0".into()));
        }
        if self.max_embed_chars == 0 {
            return Err(PipelineError::Config("max_embed_chars must be > 0".into()));
        }
        if self.pace_every == 0 {
            return Err(PipelineError::Config("pace_every must be > 0".into()));
        }
        if self.progress_every == 0 {
            return Err(PipelineError::Config("progress_every must be > 0".into()));
        }
        Ok(())
    }
}

/// Parses a `key=Source Field` pair list (comma-separated).
///
/// Malformed entries are dropped; an entirely unusable list falls back to the
/// stock projection so a typo cannot silently strip all metadata.
fn parse_metadata_fields(raw: &str) -> Vec<MetadataField> {
    let fields: Vec<MetadataField> = raw
        .split(',')
        .filter_map(|entry| {
            let (key, source) = entry.split_once('=')?;
            let key = key.trim();
            let source = source.trim();
            if key.is_empty() || source.is_empty() {
                return None;
            }
            Some(MetadataField::new(key, source))
        })
        .collect();

    if fields.is_empty() {
        warn!(raw, "METADATA_FIELDS contained no usable key=source pairs; using defaults");
        default_metadata_fields()
    } else {
        fields
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_operational_parameters() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.record_limit, 10_000);
        assert_eq!(cfg.max_embed_chars, 20_000);
        assert_eq!(cfg.pace_every, 10);
        assert_eq!(cfg.pace_delay, Duration::from_secs(1));
        assert_eq!(cfg.progress_every, 100);
        assert_eq!(cfg.metadata_fields.len(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_intervals() {
        let mut cfg = PipelineConfig::default();
        cfg.pace_every = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::default();
        cfg.progress_every = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::default();
        cfg.record_limit = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::default();
        cfg.max_embed_chars = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn metadata_pairs_parse_and_trim() {
        let fields = parse_metadata_fields("year=Production Year, operator=Operator");
        assert_eq!(
            fields,
            vec![
                MetadataField::new("year", "Production Year"),
                MetadataField::new("operator", "Operator"),
            ]
        );
    }

    #[test]
    fn unusable_metadata_list_falls_back_to_defaults() {
        let fields = parse_metadata_fields("no-equals-sign, =empty");
        assert_eq!(fields, default_metadata_fields());
    }
}
