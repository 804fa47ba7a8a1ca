//! Unified error type for the basic-pitch conversion adapter.
//!
//! Every variant maps to `polygen_core::error::AppError` with kind
//! `Conversion`, so a conversion failure is always distinguishable from a
//! transport failure.

use polygen_core::error::{AppError, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while running the external model.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The converter executable could not be started.
    #[error("conversion command not found: {command}")]
    CommandNotFound {
        /// The configured command.
        command: String,
    },

    /// The process did not finish within the configured timeout.
    #[error("conversion timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    /// The process exited with a non-zero status.
    #[error("converter exited with code {code}: {stderr}")]
    ProcessFailed {
        /// Exit code, or -1 when killed by a signal.
        code: i32,
        /// Tail of captured stderr.
        stderr: String,
    },

    /// The process succeeded but wrote no MIDI file.
    #[error("no MIDI file was generated")]
    NoMidiGenerated {
        /// Directory that was searched.
        output_dir: PathBuf,
    },

    /// The input audio file does not exist.
    #[error("input audio not found: {path}")]
    InputMissing {
        /// The missing path.
        path: PathBuf,
    },

    /// A produced MIDI file could not be parsed.
    #[error("invalid MIDI data: {0}")]
    InvalidMidi(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        AppError::with_source(
            ErrorKind::Conversion,
            format!("MIDI conversion failed: {err}"),
            err,
        )
    }
}
