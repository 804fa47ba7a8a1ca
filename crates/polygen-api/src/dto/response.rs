//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Body of a 202 from `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAccepted {
    /// Always `true`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Echo of the submitted job id.
    pub job_id: String,
}

impl ProcessAccepted {
    /// Acceptance response for a job.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Job accepted for processing".to_string(),
            job_id: job_id.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
}
