//! Callback backend configuration.

use serde::{Deserialize, Serialize};

/// Where status callbacks are delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend receiving job callbacks.
    #[serde(default = "default_url")]
    pub url: String,
    /// Timeout in seconds for a single callback POST.
    #[serde(default = "default_callback_timeout")]
    pub callback_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            callback_timeout_seconds: default_callback_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_callback_timeout() -> u64 {
    10
}
