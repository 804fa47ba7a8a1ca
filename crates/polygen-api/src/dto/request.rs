//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use polygen_core::types::{JobId, JobMetadata, ProcessingJob, ProcessingType};

/// Job submission body for `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// Caller-chosen job identifier.
    #[validate(length(min = 1, message = "jobId is required"))]
    pub job_id: String,
    /// Owning user.
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    /// Where to download the audio from.
    #[validate(custom(function = "validate_http_url"))]
    pub input_file_url: String,
    /// Pre-signed URL the MIDI result is PUT to.
    #[validate(custom(function = "validate_http_url"))]
    pub output_file_url: String,
    /// Always `AUDIO2MIDI`.
    pub processing_type: ProcessingType,
    /// Describes the input file.
    #[validate(nested)]
    pub metadata: JobMetadataRequest,
}

/// The `metadata` object of a submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadataRequest {
    /// Declared MIME type.
    pub file_type: String,
    /// Declared file name; its extension picks the audio format.
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
    /// Identifier echoed back as `fileId` in callbacks.
    #[validate(length(min = 1, message = "originalFileId is required"))]
    pub original_file_id: String,
    /// Declared size in bytes.
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl ProcessRequest {
    /// Convert into the job handed to the worker.
    pub fn into_job(self) -> ProcessingJob {
        ProcessingJob {
            job_id: JobId::new(self.job_id),
            user_id: self.user_id,
            input_file_url: self.input_file_url,
            output_file_url: self.output_file_url,
            processing_type: self.processing_type,
            metadata: JobMetadata {
                file_type: self.metadata.file_type,
                file_name: self.metadata.file_name,
                original_file_id: self.metadata.original_file_id,
                file_size: self.metadata.file_size,
            },
        }
    }
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let lower = value.trim().to_ascii_lowercase();
    let host = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));

    match host {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
        _ => {
            let mut err = ValidationError::new("http_url");
            err.message = Some("must be an http(s) URL".into());
            Err(err)
        }
    }
}
