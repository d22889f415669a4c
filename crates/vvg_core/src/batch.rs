//! Batch conversion driver.
//!
//! [`BatchConverter`] iterates a dataset in original row order and delegates
//! each row to the synthesis engine, collecting one [`ConversionResult`] per
//! row. A failed row never aborts the batch; only output-directory setup can
//! fail the run, since without a writable destination no row can succeed.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::Dataset;
use crate::synth::{EngineOutput, SynthesisEngine, SynthesisError};

/// Fatal errors from the batch driver.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The output directory could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Immutable per-run configuration for the converter.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Directory the audio files are written to.
    pub output_dir: PathBuf,
    /// Target language; part of every output filename.
    pub language: String,
    /// Voice model identifier passed to the engine.
    pub model: String,
    /// Convert only the first N rows; `None` converts everything.
    pub row_limit: Option<usize>,
}

/// Outcome of converting a single row.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Identifier of the row this result belongs to.
    pub row_id: String,
    /// Where the audio file was (or would have been) written.
    pub output_path: PathBuf,
    /// Whether the engine reported success for this row.
    pub success: bool,
    /// Exit code of the engine process, when it ran.
    pub exit_code: Option<i32>,
    /// Captured engine standard output.
    pub stdout: String,
    /// Captured engine standard error.
    pub stderr: String,
    /// Driver-side failure (engine could not be launched), if any.
    pub error: Option<String>,
}

impl ConversionResult {
    /// Result for a row whose engine process ran to completion.
    fn completed(row_id: &str, output_path: PathBuf, output: EngineOutput) -> Self {
        Self {
            row_id: row_id.to_string(),
            output_path,
            success: output.success(),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            error: None,
        }
    }

    /// Result for a row whose engine process never started.
    fn launch_failed(row_id: &str, output_path: PathBuf, error: SynthesisError) -> Self {
        Self {
            row_id: row_id.to_string(),
            output_path,
            success: false,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Drives synthesis of every (or the first N) rows of a dataset.
pub struct BatchConverter {
    config: JobConfig,
    engine: Box<dyn SynthesisEngine>,
}

impl BatchConverter {
    /// Create a converter from a run configuration and an engine.
    pub fn new(config: JobConfig, engine: Box<dyn SynthesisEngine>) -> Self {
        Self { config, engine }
    }

    /// The run configuration.
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Deterministic output path for a row id:
    /// `{output_dir}/{language}_{id}.wav`.
    ///
    /// Injective over distinct ids, so two rows never collide on disk.
    pub fn output_path(&self, id: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}_{}.wav", self.config.language, id))
    }

    /// Create the output directory tree if absent. Idempotent.
    pub fn ensure_output_dir(&self) -> BatchResult<()> {
        fs::create_dir_all(&self.config.output_dir).map_err(|source| BatchError::OutputDir {
            path: self.config.output_dir.clone(),
            source,
        })?;
        tracing::debug!("Output directory ready: {}", self.config.output_dir.display());
        Ok(())
    }

    /// Convert rows `0..min(row_limit, len)` in original order.
    ///
    /// Strictly sequential: each engine invocation blocks until the process
    /// exits. Individual row failures are recorded in the returned results
    /// and the batch continues; re-running with the same input overwrites
    /// the same output files.
    pub fn run(&self, dataset: &Dataset) -> BatchResult<Vec<ConversionResult>> {
        self.ensure_output_dir()?;

        let take = match self.config.row_limit {
            Some(limit) => limit.min(dataset.len()),
            None => dataset.len(),
        };

        tracing::info!(
            "Converting {} of {} rows to {} (model {})",
            take,
            dataset.len(),
            self.config.output_dir.display(),
            self.config.model
        );

        let mut results = Vec::with_capacity(take);
        for row in dataset.rows().iter().take(take) {
            let out_path = self.output_path(&row.id);

            let result = match self.engine.synthesize(&row.text, &self.config.model, &out_path) {
                Ok(output) => {
                    if output.success() {
                        tracing::info!("Row '{}' converted to {}", row.id, out_path.display());
                    } else {
                        tracing::warn!(
                            "Engine exited with {:?} for row '{}'",
                            output.exit_code,
                            row.id
                        );
                    }
                    ConversionResult::completed(&row.id, out_path, output)
                }
                Err(e) => {
                    tracing::error!("Could not launch engine for row '{}': {}", row.id, e);
                    ConversionResult::launch_failed(&row.id, out_path, e)
                }
            };

            results.push(result);
        }

        Ok(results)
    }
}
