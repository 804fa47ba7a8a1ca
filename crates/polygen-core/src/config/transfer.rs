//! Outbound HTTP transfer configuration.

use serde::{Deserialize, Serialize};

/// Timeouts and client settings for downloads, uploads and URL probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Timeout in seconds for HEAD/OPTIONS reachability probes.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_seconds: u64,
    /// Timeout in seconds for a full download or upload.
    #[serde(default = "default_transfer_timeout")]
    pub transfer_timeout_seconds: u64,
    /// Maximum number of redirects followed.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User-Agent header sent on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            probe_timeout_seconds: default_probe_timeout(),
            transfer_timeout_seconds: default_transfer_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_probe_timeout() -> u64 {
    30
}

fn default_transfer_timeout() -> u64 {
    300
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("polygen/{}", env!("CARGO_PKG_VERSION"))
}
