//! Result persistence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::PipelineError;
use crate::record::ResultRecord;

/// Sink for the final result sequence. One write per run, on completion.
pub trait ResultSink: Send + Sync {
    /// Persists the full sequence.
    ///
    /// # Errors
    /// Implementation-specific; a failure aborts the run (results are lost).
    fn persist(&self, results: &[ResultRecord]) -> Result<(), PipelineError>;
}

/// Writes results as one pretty-printed JSON array.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&self, results: &[ResultRecord]) -> Result<(), PipelineError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, results)?;
        writer.flush()?;

        info!(
            count = results.len(),
            path = %self.path.display(),
            "results persisted"
        );
        Ok(())
    }
}
