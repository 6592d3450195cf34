//! The sequential pipeline runner.
//!
//! Drives render → embed → assemble over a bounded working set, paces
//! requests to respect the remote rate ceiling, reports progress/ETA, and
//! persists the full result sequence once at the end. Per-record failures are
//! contained as skips and never abort the run.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::embed::{EmbedClient, EmbeddingsProvider};
use crate::errors::PipelineError;
use crate::progress::{ProgressReport, RunObserver};
use crate::record::{Record, ResultRecord, RunStats, SkipReason, project_metadata};
use crate::render::record_to_text;
use crate::sink::ResultSink;

/// Runs the full pipeline over `records` and persists the results to `sink`.
///
/// The working set is the first `min(cfg.record_limit, records.len())`
/// records in original order, processed strictly sequentially. For each
/// record at position `i` (0-based): render, embed, and on success append a
/// [`ResultRecord`] with `id = i` — skipped records leave gaps in the id
/// sequence rather than renumbering the survivors.
///
/// After every `cfg.pace_every`-th attempted record the run sleeps for
/// `cfg.pace_delay` regardless of success; after every
/// `cfg.progress_every`-th it reports progress with
/// `eta = remaining * (elapsed / attempted)`.
///
/// # Errors
/// - [`PipelineError::Config`] if the config fails validation.
/// - Sink errors from the single final persist.
///
/// Remote failures and empty renders are *not* errors here: they surface via
/// the log stream and `observer.on_skip`, and the affected record is
/// permanently skipped for this run.
pub async fn run_pipeline(
    cfg: &PipelineConfig,
    records: &[Record],
    provider: &dyn EmbeddingsProvider,
    sink: &dyn ResultSink,
    observer: &dyn RunObserver,
) -> Result<Vec<ResultRecord>, PipelineError> {
    cfg.validate()?;

    let total_available = records.len();
    let total = cfg.record_limit.min(total_available);
    let working = &records[..total];

    info!(total, total_available, "starting embedding run");

    let client = EmbedClient::new(provider, cfg.max_embed_chars);
    let mut results: Vec<ResultRecord> = Vec::with_capacity(total);
    let mut skipped = 0usize;
    let started = Instant::now();

    for (i, record) in working.iter().enumerate() {
        let attempted = i + 1;

        let text = record_to_text(record);
        if text.is_empty() {
            skipped += 1;
            warn!(index = i, "record is empty after rendering; skipping");
            observer.on_skip(i, &SkipReason::EmptyText);
        } else {
            match client.embed(&text).await {
                Ok(vector) if !vector.is_empty() => {
                    let metadata = project_metadata(record, &cfg.metadata_fields);
                    results.push(ResultRecord {
                        id: i,
                        text,
                        vector,
                        metadata,
                    });
                }
                Ok(_) => {
                    skipped += 1;
                    warn!(index = i, "provider returned an empty vector; skipping");
                    observer.on_skip(i, &SkipReason::EmptyVector);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(index = i, error = %e, "embedding failed; skipping");
                    observer.on_skip(i, &SkipReason::Embedding(e.to_string()));
                }
            }
        }

        // Pacing and progress count attempted records, success or skip.
        if attempted % cfg.progress_every == 0 {
            let elapsed = started.elapsed();
            let remaining = (total - attempted) as f64;
            let eta = elapsed.mul_f64(remaining / attempted as f64);
            let report = ProgressReport {
                attempted,
                total,
                elapsed,
                eta,
            };
            info!(
                attempted,
                total,
                percent = report.percentage(),
                eta_secs = eta.as_secs(),
                "progress"
            );
            observer.on_progress(&report);
        }

        if attempted % cfg.pace_every == 0 {
            debug!(
                attempted,
                delay_ms = cfg.pace_delay.as_millis() as u64,
                "pacing pause"
            );
            tokio::time::sleep(cfg.pace_delay).await;
        }
    }

    let stats = RunStats {
        embedded: results.len(),
        skipped,
        duration_ms: started.elapsed().as_millis(),
    };

    sink.persist(&results)?;
    observer.on_finish(&stats);

    info!(
        embedded = stats.embedded,
        skipped = stats.skipped,
        duration_ms = stats.duration_ms,
        "embedding run finished"
    );

    Ok(results)
}
