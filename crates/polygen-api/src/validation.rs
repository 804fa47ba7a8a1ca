//! Submission-time checks against the caller's URLs.
//!
//! Only the input URL can reject a submission. The output URL is probed for
//! diagnostics and never blocks acceptance.

use polygen_core::error::AppError;
use polygen_core::result::AppResult;
use polygen_transfer::{HttpTransport, Reachability};

/// Content-type fragments accepted as audio without a warning.
const AUDIO_CONTENT_TYPE_HINTS: [&str; 6] = ["audio", "mpeg", "wav", "flac", "ogg", "octet-stream"];

/// HEAD the input URL; anything but a 2xx rejects the submission.
pub async fn check_reachable(transport: &HttpTransport, url: &str) -> AppResult<()> {
    match transport.head_check(url).await {
        Reachability::Reachable { content_type, .. } => {
            if let Some(ct) = content_type.as_deref() {
                if !looks_like_audio(ct) {
                    tracing::warn!(content_type = %ct, "Unexpected content type for input audio");
                }
            }
            Ok(())
        }
        Reachability::Unreachable { reason } => Err(AppError::bad_request(format!(
            "Input file URL rejected: {reason}"
        ))),
    }
}

/// OPTIONS the output URL and log the result.
pub async fn probe_output(transport: &HttpTransport, url: &str) {
    match transport.probe_options(url).await {
        Ok(status) => tracing::info!(status, "Output URL probe response"),
        Err(e) => tracing::warn!("Output URL probe failed: {}", e),
    }
}

fn looks_like_audio(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    AUDIO_CONTENT_TYPE_HINTS.iter().any(|hint| lower.contains(hint))
}
