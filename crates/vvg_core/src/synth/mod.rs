//! Synthesis engine port and implementations.
//!
//! The external text-to-speech engine is an opaque collaborator: it takes a
//! sentence, a voice model identifier, and a destination path, and is
//! expected to write a playable audio file there. This module defines the
//! seam ([`SynthesisEngine`]) and the production implementation that shells
//! out to a CLI tool ([`CliEngine`]).

mod cli_engine;

pub use cli_engine::{CliEngine, DEFAULT_PROGRAM};

use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors from driving the synthesis engine.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The engine process could not be started at all (binary missing,
    /// permission denied). A started-but-failed run is not an error here;
    /// it comes back as an [`EngineOutput`] with a non-zero exit code.
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Captured outcome of one engine invocation.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Exit code of the engine process; `None` when killed by a signal.
    pub exit_code: Option<i32>,
    /// Everything the engine wrote to its standard output.
    pub stdout: String,
    /// Everything the engine wrote to its standard error.
    pub stderr: String,
}

impl EngineOutput {
    /// Whether the engine reported success.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port to the external text-to-speech engine.
///
/// The batch driver only talks to this trait, so tests can substitute a
/// recording double and the production CLI tool can be swapped without
/// touching the loop.
pub trait SynthesisEngine: Send + Sync {
    /// Synthesize one sentence to an audio file at `out_path`.
    ///
    /// Returns the captured process outcome, or an error only if the engine
    /// could not be invoked at all. The audio file itself is not verified.
    fn synthesize(&self, text: &str, model: &str, out_path: &Path) -> SynthesisResult<EngineOutput>;
}
