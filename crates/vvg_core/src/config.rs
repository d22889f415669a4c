//! Settings with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field has a default, so a partial (or absent) settings file is
//! fine; command-line flags override whatever the file says.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{ColumnMapping, DEFAULT_ID_COLUMN, DEFAULT_TEXT_COLUMN};
use crate::synth::DEFAULT_PROGRAM;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Synthesis engine settings.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Dataset column selection.
    #[serde(default)]
    pub dataset: DatasetSettings,

    /// Output language and folder.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Synthesis engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Engine executable, looked up on PATH.
    #[serde(default = "default_program")]
    pub program: String,

    /// Voice model identifier passed to the engine.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_model() -> String {
    "tts_models/hau/openbible/vits".to_string()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            model: default_model(),
        }
    }
}

/// Which source columns hold the identifier and the sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSettings {
    /// Header of the identifier column.
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Header of the sentence column.
    #[serde(default = "default_text_column")]
    pub text_column: String,
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.to_string()
}

fn default_text_column() -> String {
    DEFAULT_TEXT_COLUMN.to_string()
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            text_column: default_text_column(),
        }
    }
}

impl DatasetSettings {
    /// The column mapping to load datasets with.
    pub fn mapping(&self) -> ColumnMapping {
        ColumnMapping {
            id_column: self.id_column.clone(),
            text_column: self.text_column.clone(),
        }
    }
}

/// Output language and destination folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Target language; part of every output filename and the default
    /// output folder name.
    #[serde(default = "default_language")]
    pub language: String,

    /// Output folder override. When unset, files land in a folder named
    /// after the language.
    #[serde(default)]
    pub folder: Option<String>,
}

fn default_language() -> String {
    "hausa".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            folder: None,
        }
    }
}

/// Load settings from a TOML file.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = fs::read_to_string(path.as_ref())?;
    let settings = toml::from_str(&content)?;
    Ok(settings)
}

/// Load settings from a TOML file, falling back to defaults when the file
/// does not exist. A present-but-broken file is still an error.
pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    load_settings(path)
}
