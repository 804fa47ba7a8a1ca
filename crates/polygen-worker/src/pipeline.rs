//! The audio-to-MIDI job pipeline.
//!
//! Stages run strictly in order: download, convert, upload. Progress updates
//! go out as each stage starts (10, 50, 90). The first error aborts the
//! remaining stages and produces a single `failed` update; a clean run
//! produces a single `completed` update carrying the uploaded byte count.
//! The working directory is removed on every exit path, including a panic
//! inside a stage.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::FutureExt;
use tracing;

use polygen_core::result::AppResult;
use polygen_core::traits::{MidiConverter, StatusReporter};
use polygen_core::types::{
    AudioFormat, MIDI_CONTENT_TYPE, ProcessingJob, Progress, StatusUpdate,
};
use polygen_transfer::HttpTransport;

use crate::workspace::JobWorkspace;

/// Subdirectory of the workspace the converter writes into.
const MIDI_OUTPUT_DIR: &str = "midi_output";

/// How a job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The MIDI file was uploaded.
    Completed {
        /// Uploaded byte count.
        size: u64,
    },
    /// A stage failed.
    Failed {
        /// Message sent in the `failed` update.
        message: String,
    },
}

/// Runs one job end to end.
#[derive(Debug, Clone)]
pub struct AudioToMidiPipeline {
    transport: Arc<HttpTransport>,
    converter: Arc<dyn MidiConverter>,
    reporter: Arc<dyn StatusReporter>,
    temp_root: PathBuf,
}

impl AudioToMidiPipeline {
    /// Create a pipeline over the given capabilities.
    pub fn new(
        transport: Arc<HttpTransport>,
        converter: Arc<dyn MidiConverter>,
        reporter: Arc<dyn StatusReporter>,
        temp_root: PathBuf,
    ) -> Self {
        Self {
            transport,
            converter,
            reporter,
            temp_root,
        }
    }

    /// Run the job to completion. Never returns an error: failures become a
    /// `failed` status update.
    pub async fn run(&self, job: ProcessingJob) -> JobOutcome {
        tracing::info!(
            job_id = %job.job_id,
            converter = self.converter.name(),
            "Starting job"
        );

        let mut workspace: Option<JobWorkspace> = None;
        let result = AssertUnwindSafe(self.execute(&job, &mut workspace))
            .catch_unwind()
            .await;

        let outcome = match result {
            Ok(Ok(size)) => {
                self.reporter
                    .report(&job.job_id, &StatusUpdate::completed(&job, size))
                    .await;
                tracing::info!(job_id = %job.job_id, size, "Job completed successfully");
                JobOutcome::Completed { size }
            }
            Ok(Err(err)) => {
                tracing::error!(job_id = %job.job_id, error = ?err, "Job failed: {}", err.message);
                self.fail(&job, err.message).await
            }
            Err(panic) => {
                let message = format!("Internal error: {}", panic_message(panic.as_ref()));
                tracing::error!(job_id = %job.job_id, "Job panicked: {}", message);
                self.fail(&job, message).await
            }
        };

        if let Some(mut ws) = workspace {
            match ws.cleanup().await {
                Ok(()) => tracing::info!(
                    job_id = %job.job_id,
                    path = %ws.path().display(),
                    "Cleaned up temporary directory"
                ),
                Err(e) => tracing::warn!(
                    job_id = %job.job_id,
                    path = %ws.path().display(),
                    "Failed to clean up temporary directory: {}",
                    e
                ),
            }
        }

        outcome
    }

    async fn fail(&self, job: &ProcessingJob, message: String) -> JobOutcome {
        self.reporter
            .report(&job.job_id, &StatusUpdate::failed(job, message.clone()))
            .await;
        JobOutcome::Failed { message }
    }

    /// The staged work. Returns the uploaded size.
    async fn execute(
        &self,
        job: &ProcessingJob,
        workspace: &mut Option<JobWorkspace>,
    ) -> AppResult<u64> {
        let ws = workspace.insert(JobWorkspace::create(&self.temp_root, &job.job_id).await?);

        self.progress(job, Progress::DOWNLOADING, "Downloading audio file...")
            .await;
        let audio_path = self.download(job, ws.path()).await?;

        self.progress(job, Progress::CONVERTING, "Converting audio to MIDI...")
            .await;
        let midi_path = self
            .converter
            .convert(&audio_path, &ws.path().join(MIDI_OUTPUT_DIR))
            .await?;

        self.progress(job, Progress::UPLOADING, "Uploading converted MIDI file...")
            .await;
        self.upload(job, &midi_path).await
    }

    async fn progress(&self, job: &ProcessingJob, progress: Progress, message: &str) {
        tracing::debug!(job_id = %job.job_id, progress = progress.value(), "{}", message);
        self.reporter
            .report(&job.job_id, &StatusUpdate::processing(job, progress, message))
            .await;
    }

    /// Fetch the input audio. The extension is checked before any network
    /// traffic.
    async fn download(&self, job: &ProcessingJob, dir: &Path) -> AppResult<PathBuf> {
        let format = AudioFormat::from_file_name(&job.metadata.file_name)?;
        let body = self.transport.get(&job.input_file_url).await?;

        let path = dir.join(format.input_file_name());
        tokio::fs::write(&path, &body).await?;

        tracing::info!(
            job_id = %job.job_id,
            path = %path.display(),
            bytes = body.len(),
            "Downloaded input audio"
        );
        Ok(path)
    }

    async fn upload(&self, job: &ProcessingJob, midi_path: &Path) -> AppResult<u64> {
        let content = tokio::fs::read(midi_path).await?;
        let size = content.len() as u64;

        self.transport
            .put(&job.output_file_url, Bytes::from(content), MIDI_CONTENT_TYPE)
            .await?;

        tracing::info!(job_id = %job.job_id, size, "Uploaded MIDI file");
        Ok(size)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}
