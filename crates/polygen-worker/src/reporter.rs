//! Status reporting over HTTP callbacks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing;

use polygen_core::config::BackendConfig;
use polygen_core::traits::StatusReporter;
use polygen_core::types::{JobId, StatusUpdate};
use polygen_transfer::HttpTransport;

/// Posts status updates to `{backend}/api/users/jobs/{job_id}/callback`.
#[derive(Debug, Clone)]
pub struct CallbackReporter {
    transport: Arc<HttpTransport>,
    base_url: String,
    timeout: Duration,
}

impl CallbackReporter {
    /// Create a reporter targeting the configured backend.
    pub fn new(transport: Arc<HttpTransport>, config: &BackendConfig) -> Self {
        Self {
            transport,
            base_url: config.url.clone(),
            timeout: Duration::from_secs(config.callback_timeout_seconds),
        }
    }

    /// Callback URL for a job.
    pub fn callback_url(base_url: &str, job_id: &JobId) -> String {
        format!(
            "{}/api/users/jobs/{}/callback",
            base_url.trim_end_matches('/'),
            job_id
        )
    }
}

#[async_trait]
impl StatusReporter for CallbackReporter {
    async fn report(&self, job_id: &JobId, update: &StatusUpdate) {
        let url = Self::callback_url(&self.base_url, job_id);

        match self.transport.post_json(&url, update, self.timeout).await {
            Ok(()) => tracing::info!(
                job_id = %job_id,
                status = %update.status,
                progress = update.progress.value(),
                "Sent status update"
            ),
            Err(e) => tracing::error!(
                job_id = %job_id,
                status = %update.status,
                "Failed to send status update: {}",
                e
            ),
        }
    }
}
