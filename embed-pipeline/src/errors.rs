//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for embed-pipeline operations.
///
/// Per-record problems (empty render, failed embedding) are *not* errors at
/// this level: the runner contains them as skips. Only failures that abort a
/// whole operation surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input content cannot be parsed, even after the one repair attempt.
    /// Fatal for the run: no records are processed, no output is written.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// CSV reading errors (convert step).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors (writing records or results).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Remote embedding call failed (string form at the provider seam).
    #[error("embedding failed: {0}")]
    Embedding(String),
}
