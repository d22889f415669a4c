//! Command-line front-end for Verse Voice Generator.
//!
//! Loads a CSV of translated sentences, then drives the external TTS engine
//! once per row, echoing each row's captured engine output so failed rows
//! can be audited afterwards. Individual row failures never change the exit
//! status; only driver-level errors (dataset load, settings parse, output
//! directory) do.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vvg_core::batch::{BatchConverter, ConversionResult, JobConfig};
use vvg_core::config::{self, Settings};
use vvg_core::dataset::load_dataset;
use vvg_core::synth::CliEngine;

#[derive(Debug, Parser)]
#[command(name = "verse-voice-gen")]
#[command(about = "Batch text-to-speech conversion for translated verse sheets", version)]
struct Cli {
    /// Path to the CSV file, one translated sentence per row.
    #[arg(long)]
    csv: PathBuf,

    /// Convert only the first N rows.
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,

    /// Target language; names the default output folder and prefixes
    /// every output filename.
    #[arg(long)]
    language: Option<String>,

    /// Voice model identifier passed to the engine.
    #[arg(long)]
    model: Option<String>,

    /// Output directory (defaults to a folder named after the language).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Optional TOML settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => config::load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let dataset = load_dataset(&cli.csv, &settings.dataset.mapping())
        .with_context(|| format!("loading dataset from {}", cli.csv.display()))?;

    let (job, engine) = build_job(&cli, &settings);
    let converter = BatchConverter::new(job, Box::new(engine));

    let results = converter.run(&dataset).context("running batch conversion")?;
    report(&results);

    Ok(())
}

/// Merge CLI flags over file settings over built-in defaults.
fn build_job(cli: &Cli, settings: &Settings) -> (JobConfig, CliEngine) {
    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| settings.output.language.clone());
    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| settings.engine.model.clone());
    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| settings.output.folder.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(&language));

    let job = JobConfig {
        output_dir,
        language,
        model,
        row_limit: cli.limit,
    };
    let engine = CliEngine::new(settings.engine.program.clone());
    (job, engine)
}

/// Echo each row's captured engine output, then a summary.
fn report(results: &[ConversionResult]) {
    for result in results {
        println!("--- {} -> {}", result.row_id, result.output_path.display());
        if let Some(error) = &result.error {
            println!("ERROR: {error}");
        }
        println!("STDOUT: {}", result.stdout);
        println!("STDERR: {}", result.stderr);
    }

    let failed = results.iter().filter(|r| !r.success).count();
    tracing::info!(
        "Batch complete: {} converted, {} failed",
        results.len() - failed,
        failed
    );
}
