//! Tracing subscriber setup for binaries.
//!
//! Keeps the output compact and single-line, with RFC3339 UTC timestamps and
//! ANSI colors only when stdout is a terminal. Level filtering honors
//! `RUST_LOG` and falls back to the caller-supplied default directives.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt};

/// RFC3339 UTC timer implemented via `chrono` (no extra features).
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        // Keep timestamps compact: no fractional seconds, Z-suffix
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Installs the global subscriber for a binary entrypoint.
///
/// `default_directives` is used when `RUST_LOG` is unset (e.g., `"info"`).
/// Calling this twice is a no-op: the second install attempt is ignored, which
/// keeps it safe under test harnesses.
pub fn init(default_directives: &str) {
    let use_ansi = io::stdout().is_terminal();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_ansi(use_ansi)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
