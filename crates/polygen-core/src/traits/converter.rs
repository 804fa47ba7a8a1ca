//! Audio-to-MIDI conversion capability.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::result::AppResult;

/// Wraps the external inference model: audio file in, MIDI file out.
///
/// Implementations write only into `output_dir` and return the path of the
/// produced MIDI file. Producing no MIDI file is an error.
#[async_trait]
pub trait MidiConverter: Send + Sync + std::fmt::Debug + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Convert `audio_path` and return the produced MIDI file.
    async fn convert(&self, audio_path: &Path, output_dir: &Path) -> AppResult<PathBuf>;
}
