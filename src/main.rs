use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use ai_embed_service::{GeminiService, config_gemini_embedding, telemetry};
use embed_pipeline::{
    GeminiEmbedder, IndicatifObserver, JsonFileSink, PipelineConfig, clean_json_file,
    convert_csv_file, load_records_from_path, run_pipeline,
};

#[derive(Parser, Debug)]
#[command(
    name = "embed-prep",
    about = "Turns tabular well records into a persisted embedding dataset"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a headed CSV export into a JSON array of records
    Convert {
        #[arg(long, default_value = "original.csv")]
        input: PathBuf,
        #[arg(long, default_value = "output.json")]
        output: PathBuf,
    },
    /// Replace NaN literals with null and validate the result
    Clean {
        #[arg(long, default_value = "output.json")]
        input: PathBuf,
        #[arg(long, default_value = "output_cleaned.json")]
        output: PathBuf,
    },
    /// Embed records through Gemini and persist the vector dataset
    Embed {
        #[arg(long, default_value = "output_cleaned.json")]
        input: PathBuf,
        #[arg(long, default_value = "embeddings.json")]
        output: PathBuf,
        /// Cap on the number of records to attempt (overrides RECORD_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env when present. A missing file is
    // fine, the process environment still applies.
    dotenvy::dotenv().ok();

    telemetry::init("info");

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert { input, output } => {
            let rows = convert_csv_file(&input, &output)
                .with_context(|| format!("converting {}", input.display()))?;
            println!(
                "{} {} rows -> {}",
                "converted".green().bold(),
                rows,
                output.display()
            );
        }
        Command::Clean { input, output } => {
            let replaced = clean_json_file(&input, &output)
                .with_context(|| format!("cleaning {}", input.display()))?;
            println!(
                "{} {} NaN literal(s) -> {}",
                "replaced".green().bold(),
                replaced,
                output.display()
            );
        }
        Command::Embed {
            input,
            output,
            limit,
        } => embed(input, output, limit).await?,
    }

    Ok(())
}

async fn embed(input: PathBuf, output: PathBuf, limit: Option<usize>) -> anyhow::Result<()> {
    let mut cfg = PipelineConfig::from_env();
    if let Some(limit) = limit {
        cfg.record_limit = limit;
    }

    let svc = GeminiService::new(config_gemini_embedding()?)?;

    // Preflight is advisory only: a failed probe logs a warning and the run
    // continues, the first real call will surface any hard failure.
    match svc.check_model().await {
        Ok(name) => info!(model = %name, "embedding model reachable"),
        Err(err) => warn!(error = %err, "model preflight failed, continuing"),
    }

    let records = load_records_from_path(&input)?;
    let total = records.len().min(cfg.record_limit);

    let provider = GeminiEmbedder::new(Arc::new(svc));
    let sink = JsonFileSink::new(&output);
    let observer = IndicatifObserver::bar(total as u64);

    let results = run_pipeline(&cfg, &records, &provider, &sink, &observer).await?;

    println!(
        "{} {} embedded, {} skipped -> {}",
        "done".green().bold(),
        results.len(),
        total - results.len(),
        output.display()
    );
    Ok(())
}
