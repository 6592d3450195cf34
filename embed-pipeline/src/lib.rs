//! Batch embedding pipeline: tabular records in, persisted vector dataset out.
//!
//! This crate provides the full record-to-embedding flow:
//! - Convert a headed CSV into JSON records ([`convert_csv_file`])
//! - Clean non-standard `NaN` literals ([`clean_json_file`])
//! - Load records with a single, named repair pass ([`load_records_from_path`])
//! - Render each record to canonical text ([`record_to_text`])
//! - Drive the sequential embed/pace/progress loop ([`run_pipeline`])
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules. The pipeline core depends only on injected seams: an
//! [`EmbeddingsProvider`], a [`ResultSink`], and a [`RunObserver`].

mod config;
mod convert;
mod embed;
mod errors;
mod loader;
mod progress;
mod record;
mod render;
mod runner;
mod sink;

pub use config::PipelineConfig;
pub use convert::{convert_csv_file, csv_to_records, write_records_json};
pub use embed::{EmbedClient, EmbeddingsProvider, GeminiEmbedder, truncate_chars};
pub use errors::PipelineError;
pub use loader::{
    clean_json_file, load_records_from_path, parse_records, scrub_nan_literals,
    strip_trailing_commas,
};
pub use progress::{IndicatifObserver, NoopObserver, ProgressReport, RunObserver};
pub use record::{
    MetadataField, Record, ResultRecord, RunStats, SkipReason, default_metadata_fields,
    project_metadata,
};
pub use render::record_to_text;
pub use runner::run_pipeline;
pub use sink::{JsonFileSink, ResultSink};
