//! Submit a test job.

use clap::Args;
use serde_json::Value;
use uuid::Uuid;

use polygen_core::error::AppError;
use polygen_core::types::{JobId, JobMetadata, ProcessingJob, ProcessingType};

use crate::output::{self, OutputFormat};

/// Arguments for `submit`
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Base URL of the Polygen service
    #[arg(long, default_value = "http://localhost:8000")]
    pub service: String,

    /// Base URL of the backend serving test files and receiving callbacks
    #[arg(long, default_value = "http://localhost:3000")]
    pub backend: String,

    /// Audio file name under `<backend>/test-files/`
    #[arg(long, default_value = "sample_audio.mp3")]
    pub file: String,

    /// Submitting user
    #[arg(long, default_value = "test_user_001")]
    pub user: String,

    /// Explicit job id (a random UUID when omitted)
    #[arg(long)]
    pub job_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
}

/// Build the job a test submission sends.
pub fn build_job(args: &SubmitArgs) -> ProcessingJob {
    let job_id = args
        .job_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let backend = args.backend.trim_end_matches('/');

    ProcessingJob {
        input_file_url: format!("{backend}/test-files/{}", args.file),
        output_file_url: format!("{backend}/test-files/output_{job_id}.mid"),
        user_id: args.user.clone(),
        processing_type: ProcessingType::Audio2Midi,
        metadata: JobMetadata {
            file_type: guess_mime(&args.file).to_string(),
            file_name: args.file.clone(),
            original_file_id: format!("test_file_{job_id}"),
            file_size: None,
        },
        job_id: JobId::new(job_id),
    }
}

/// Execute `submit`
pub async fn execute(args: &SubmitArgs) -> Result<(), AppError> {
    let job = build_job(args);
    let url = format!("{}/process", args.service.trim_end_matches('/'));

    tracing::info!(job_id = %job.job_id, url = %url, "Submitting job");

    let response = super::http_client(args.timeout)?
        .post(&url)
        .json(&job)
        .send()
        .await
        .map_err(|e| AppError::transfer(format!("Request to {url} failed: {e}")))?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| AppError::transfer(format!("Invalid response from {url}: {e}")))?;

    if status.is_success() {
        output::print_success(&format!("Job {} accepted (HTTP {})", job.job_id, status.as_u16()));
        output::print_item(&body, OutputFormat::Json);
        Ok(())
    } else {
        output::print_item(&body, OutputFormat::Json);
        Err(AppError::bad_request(format!(
            "Service rejected job {} with HTTP {}",
            job.job_id,
            status.as_u16()
        )))
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    match lower.rsplit('.').next() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        _ => "application/octet-stream",
    }
}
