//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `POLYGEN_`-prefixed environment variables. Each
//! sub-module represents a logical configuration section, and every field
//! has a default so the service starts with no files present.

pub mod app;
pub mod backend;
pub mod conversion;
pub mod logging;
pub mod transfer;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::backend::BackendConfig;
pub use self::conversion::ConversionConfig;
pub use self::logging::LoggingConfig;
pub use self::transfer::TransferConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Flat environment variable naming the callback backend.
pub const BACKEND_URL_ENV: &str = "POLYGEN_BACKEND_URL";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Callback backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Outbound HTTP transfer settings.
    #[serde(default)]
    pub transfer: TransferConfig,
    /// External converter settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Background job settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default` with an environment-specific overlay,
    /// environment variables prefixed with `POLYGEN_` (nested keys separated
    /// by `__`), and finally the flat `POLYGEN_BACKEND_URL` variable.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("POLYGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("backend.url", std::env::var(BACKEND_URL_ENV).ok())?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_http_url(&self.backend.url) {
            return Err(AppError::configuration(format!(
                "backend.url must be an http(s) URL, got '{}'",
                self.backend.url
            )));
        }
        if self.server.port == 0 {
            return Err(AppError::configuration("server.port must be non-zero"));
        }
        if self.backend.callback_timeout_seconds == 0
            || self.transfer.probe_timeout_seconds == 0
            || self.transfer.transfer_timeout_seconds == 0
        {
            return Err(AppError::configuration("timeouts must be non-zero"));
        }
        if self.conversion.command.trim().is_empty() {
            return Err(AppError::configuration("conversion.command must be set"));
        }
        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("http://")
        .or_else(|| lower.strip_prefix("https://"));
    matches!(rest, Some(host) if !host.is_empty())
}
