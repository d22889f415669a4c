//! CLI subprocess implementation of the synthesis port.
//!
//! Invocation contract:
//!
//! ```text
//! <program> --text <sentence> --model_name <model> --out_path <path>
//! ```
//!
//! On success the tool writes a playable audio file to the given path and
//! exits zero; on failure it exits non-zero and/or writes diagnostics to its
//! error stream. Both streams are captured either way.

use std::path::Path;
use std::process::Command;

use super::{EngineOutput, SynthesisEngine, SynthesisError, SynthesisResult};

/// Default engine executable, looked up on PATH.
pub const DEFAULT_PROGRAM: &str = "tts";

/// Shells out to a text-to-speech command-line tool.
///
/// The program name is configurable so an alternative engine (or a stub in
/// tests) can be substituted without changing the calling convention.
#[derive(Debug, Clone)]
pub struct CliEngine {
    program: String,
}

impl CliEngine {
    /// Create an engine wrapper around the given executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this engine invokes.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CliEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl SynthesisEngine for CliEngine {
    fn synthesize(&self, text: &str, model: &str, out_path: &Path) -> SynthesisResult<EngineOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--text")
            .arg(text)
            .arg("--model_name")
            .arg(model)
            .arg("--out_path")
            .arg(out_path);

        tracing::debug!(
            "Running: {} --text <{} chars> --model_name {} --out_path {}",
            self.program,
            text.len(),
            model,
            out_path.display()
        );

        let output = cmd.output().map_err(|source| SynthesisError::Launch {
            program: self.program.clone(),
            source,
        })?;

        Ok(EngineOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
