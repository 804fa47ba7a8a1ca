//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use polygen_core::config::AppConfig;
use polygen_transfer::HttpTransport;
use polygen_worker::JobRunner;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Nothing in here is
/// mutable: jobs never share state with each other or with the API.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// HTTP transport used for submission-time probes
    pub transport: Arc<HttpTransport>,
    /// Detaches accepted jobs onto background tasks
    pub runner: JobRunner,
    /// Process start, for the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(config: Arc<AppConfig>, transport: Arc<HttpTransport>, runner: JobRunner) -> Self {
        Self {
            config,
            transport,
            runner,
            started_at: Instant::now(),
        }
    }
}
