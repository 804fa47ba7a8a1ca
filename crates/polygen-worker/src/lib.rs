//! Background job processing for Polygen.
//!
//! This crate provides:
//! - The audio-to-MIDI pipeline (download, convert, upload, report)
//! - A scoped per-job working directory that is always removed
//! - The callback-based status reporter
//! - A runner that detaches each job onto its own task

pub mod pipeline;
pub mod reporter;
pub mod runner;
pub mod workspace;

pub use pipeline::{AudioToMidiPipeline, JobOutcome};
pub use reporter::CallbackReporter;
pub use runner::JobRunner;
pub use workspace::JobWorkspace;
