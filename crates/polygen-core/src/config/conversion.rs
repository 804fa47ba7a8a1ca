//! External audio-to-MIDI converter configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the basic-pitch inference command.
///
/// The model artifact is fixed for the lifetime of the process. When
/// `model_path` is unset the converter's bundled default model is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Executable invoked for each conversion.
    #[serde(default = "default_command")]
    pub command: String,
    /// Model artifact passed as `--model-path`.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Additional arguments appended after the positional ones.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Optional upper bound in seconds for one conversion. Unset means the
    /// process may run indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            model_path: None,
            extra_args: Vec::new(),
            timeout_seconds: None,
        }
    }
}

fn default_command() -> String {
    "basic-pitch".to_string()
}
