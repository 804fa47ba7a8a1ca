//! # Plugin basic-pitch
//!
//! A Polygen conversion adapter that turns audio recordings into MIDI using
//! Spotify's basic-pitch pretrained model, invoked through its command-line
//! entry point as a child process.
//!
//! Only the MIDI artifact is produced. The model's optional auxiliary
//! outputs (sonified audio, raw model outputs, note-event CSVs) stay
//! disabled.

pub mod converter;
pub mod error;
pub mod executor;
pub mod midi;

pub use converter::BasicPitchConverter;
pub use error::ConversionError;
pub use executor::{ConversionExecutor, ExecutionParams, ExecutionResult};
pub use midi::MidiSummary;
