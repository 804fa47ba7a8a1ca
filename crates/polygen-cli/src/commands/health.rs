//! Query a service's health endpoint.

use clap::Args;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use polygen_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for `health`
#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Base URL of the Polygen service
    #[arg(long, default_value = "http://localhost:8000")]
    pub service: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

/// Health payload as printed.
#[derive(Debug, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct HealthRow {
    /// Liveness status
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Seconds since start
    #[tabled(rename = "uptime (s)")]
    pub uptime_seconds: u64,
}

/// Execute `health`
pub async fn execute(args: &HealthArgs, format: OutputFormat) -> Result<(), AppError> {
    let url = format!("{}/health", args.service.trim_end_matches('/'));

    let response = super::http_client(args.timeout)?
        .get(&url)
        .send()
        .await
        .map_err(|e| AppError::service_unavailable(format!("{url} unreachable: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::service_unavailable(format!(
            "{url} answered HTTP {}",
            response.status().as_u16()
        )));
    }

    let row: HealthRow = response
        .json()
        .await
        .map_err(|e| AppError::transfer(format!("Invalid health payload from {url}: {e}")))?;

    output::print_list(&[row], format);
    Ok(())
}
