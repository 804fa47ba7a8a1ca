//! The basic-pitch conversion adapter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing;

use polygen_core::config::ConversionConfig;
use polygen_core::result::AppResult;
use polygen_core::traits::MidiConverter;

use crate::error::ConversionError;
use crate::executor::{ConversionExecutor, ExecutionParams, ExecutionResult, tail};
use crate::midi::MidiSummary;

/// Extensions accepted as converter output.
const MIDI_EXTENSIONS: [&str; 2] = ["mid", "midi"];

/// Runs `basic-pitch <output_dir> <audio> [--model-path <model>] [extra...]`.
///
/// The model reference is fixed at construction time. The CLI writes only
/// the MIDI file unless asked for sonification, model outputs or note
/// events, and this adapter never passes those flags.
#[derive(Debug, Clone)]
pub struct BasicPitchConverter {
    config: ConversionConfig,
    executor: ConversionExecutor,
}

impl BasicPitchConverter {
    /// Create a converter from configuration.
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            executor: ConversionExecutor::new(),
        }
    }

    /// Whether the configured command can be found.
    pub async fn is_available(&self) -> bool {
        self.executor
            .check_command_available(&self.config.command)
            .await
    }

    /// Build the argument list for one conversion.
    pub fn build_args(&self, audio_path: &Path, output_dir: &Path) -> Vec<String> {
        let mut args = vec![
            output_dir.to_string_lossy().to_string(),
            audio_path.to_string_lossy().to_string(),
        ];

        if let Some(ref model) = self.config.model_path {
            args.push("--model-path".to_string());
            args.push(model.to_string_lossy().to_string());
        }

        args.extend(self.config.extra_args.iter().cloned());
        args
    }

    async fn run(
        &self,
        audio_path: &Path,
        output_dir: &Path,
    ) -> Result<(PathBuf, ExecutionResult), ConversionError> {
        if tokio::fs::metadata(audio_path).await.is_err() {
            return Err(ConversionError::InputMissing {
                path: audio_path.to_path_buf(),
            });
        }

        tokio::fs::create_dir_all(output_dir).await?;

        let params = ExecutionParams {
            command: self.config.command.clone(),
            args: self.build_args(audio_path, output_dir),
            working_dir: Some(output_dir.to_path_buf()),
            timeout: self.config.timeout_seconds.map(Duration::from_secs),
        };

        let execution = self.executor.execute(&params).await?;

        let midi_path = find_midi_file(output_dir)
            .await?
            .ok_or_else(|| ConversionError::NoMidiGenerated {
                output_dir: output_dir.to_path_buf(),
            })?;
        Ok((midi_path, execution))
    }
}

#[async_trait]
impl MidiConverter for BasicPitchConverter {
    fn name(&self) -> &str {
        "basic-pitch"
    }

    async fn convert(&self, audio_path: &Path, output_dir: &Path) -> AppResult<PathBuf> {
        let (midi_path, execution) = self.run(audio_path, output_dir).await?;
        tracing::info!(
            command = %self.config.command,
            duration_ms = execution.duration_ms,
            "Converter finished"
        );
        tracing::debug!(
            stdout = %tail(&execution.stdout, 500),
            stderr = %tail(&execution.stderr, 500),
            "Converter output"
        );

        match MidiSummary::from_file(&midi_path).await {
            Ok(summary) => tracing::info!(
                path = %midi_path.display(),
                tracks = summary.track_count,
                notes = summary.note_count,
                tempo_changes = summary.tempo_changes,
                duration_seconds = summary.duration_seconds,
                "MIDI file generated"
            ),
            Err(e) => tracing::warn!(
                path = %midi_path.display(),
                "MIDI analysis failed: {}",
                e
            ),
        }

        Ok(midi_path)
    }
}

/// First MIDI file in `dir`, by name order.
async fn find_midi_file(dir: &Path) -> Result<Option<PathBuf>, ConversionError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut found = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_midi = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| MIDI_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_midi && entry.file_type().await?.is_file() {
            found.push(path);
        }
    }

    found.sort();
    Ok(found.into_iter().next())
}
