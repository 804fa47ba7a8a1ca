//! Status updates pushed to the callback backend.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::job::ProcessingJob;

/// Status reported for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// A stage is in progress.
    Processing,
    /// The MIDI result was uploaded.
    Completed,
    /// A stage failed; no further stages run.
    Failed,
}

impl JobStatus {
    /// Check if the status ends the job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage complete, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Reported on failure.
    pub const FAILED: Self = Self(0);
    /// Download stage started.
    pub const DOWNLOADING: Self = Self(10);
    /// Conversion stage started.
    pub const CONVERTING: Self = Self(50);
    /// Upload stage started.
    pub const UPLOADING: Self = Self(90);
    /// Job completed.
    pub const DONE: Self = Self(100);

    /// Create a progress value, rejecting anything above 100.
    pub fn new(value: u8) -> Result<Self, AppError> {
        if value > 100 {
            return Err(AppError::validation(format!(
                "progress must be within 0..=100, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Raw percentage.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Progress {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

/// Body of one callback POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Owning user of the job.
    pub user_id: String,
    /// Originating file identifier from the job metadata.
    pub file_id: String,
    /// Current status.
    pub status: JobStatus,
    /// Percentage complete.
    pub progress: Progress,
    /// Human-readable message.
    pub message: String,
    /// Size in bytes of the uploaded MIDI file, on completion only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// This service's identifier for the job; the backend names it `pythonJobId`.
    #[serde(rename = "pythonJobId")]
    pub worker_job_id: String,
}

impl StatusUpdate {
    fn for_job(
        job: &ProcessingJob,
        status: JobStatus,
        progress: Progress,
        message: impl Into<String>,
        size: Option<u64>,
    ) -> Self {
        Self {
            user_id: job.user_id.clone(),
            file_id: job.metadata.original_file_id.clone(),
            status,
            progress,
            message: message.into(),
            size,
            worker_job_id: job.job_id.to_string(),
        }
    }

    /// An intermediate `processing` update.
    pub fn processing(job: &ProcessingJob, progress: Progress, message: impl Into<String>) -> Self {
        Self::for_job(job, JobStatus::Processing, progress, message, None)
    }

    /// The terminal success update carrying the uploaded size.
    pub fn completed(job: &ProcessingJob, size: u64) -> Self {
        Self::for_job(
            job,
            JobStatus::Completed,
            Progress::DONE,
            "Processing completed successfully.",
            Some(size),
        )
    }

    /// The terminal failure update carrying a short error message.
    pub fn failed(job: &ProcessingJob, message: impl Into<String>) -> Self {
        Self::for_job(job, JobStatus::Failed, Progress::FAILED, message, None)
    }
}
