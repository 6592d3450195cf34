//! Lightweight run observation for the pipeline.
//!
//! Use `NoopObserver` for headless runs and `IndicatifObserver` for CLI/TTY.
//! The pipeline core only talks to the [`RunObserver`] trait, so it has no
//! direct output-stream dependency.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::record::{RunStats, SkipReason};

/// Snapshot handed to [`RunObserver::on_progress`] at each report interval.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReport {
    /// Attempted records so far (1-based count).
    pub attempted: usize,
    /// Size of the working set.
    pub total: usize,
    /// Wall time since the run started.
    pub elapsed: Duration,
    /// Projected time remaining, assuming uniform per-record latency.
    pub eta: Duration,
}

impl ProgressReport {
    /// Completion percentage over the working set.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.attempted as f64 / self.total as f64) * 100.0
    }
}

/// Minimal observer interface used inside the run loop.
pub trait RunObserver: Send + Sync {
    /// Called at every progress interval.
    fn on_progress(&self, _report: &ProgressReport) {}
    /// Called when an attempted record is skipped (0-based index).
    fn on_skip(&self, _index: usize, _reason: &SkipReason) {}
    /// Called once after the results have been persisted.
    fn on_finish(&self, _stats: &RunStats) {}
}

/// No-op observer for headless runs and tests.
#[derive(Default, Clone, Copy)]
pub struct NoopObserver;
impl RunObserver for NoopObserver {}

/// Indicatif-based bar for CLI runs.
pub struct IndicatifObserver {
    pb: ProgressBar,
}

impl IndicatifObserver {
    /// Bounded bar over the working set size.
    pub fn bar(len: u64) -> Self {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
        );
        Self { pb }
    }
}

impl RunObserver for IndicatifObserver {
    fn on_progress(&self, report: &ProgressReport) {
        self.pb.set_position(report.attempted as u64);
        self.pb.set_message(format!(
            "{:.1}% | ETA {:.1} min",
            report.percentage(),
            report.eta.as_secs_f64() / 60.0
        ));
    }

    fn on_skip(&self, index: usize, reason: &SkipReason) {
        self.pb.println(format!("skipped record #{} ({reason})", index + 1));
    }

    fn on_finish(&self, stats: &RunStats) {
        self.pb.finish_with_message(format!(
            "embedded {} | skipped {} | {:.1} min",
            stats.embedded,
            stats.skipped,
            stats.duration_ms as f64 / 60_000.0
        ));
    }
}
