//! Polygen server: audio-to-MIDI conversion service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use plugin_basic_pitch::BasicPitchConverter;
use polygen_core::config::AppConfig;
use polygen_core::error::AppError;
use polygen_core::traits::MidiConverter;

#[tokio::main]
async fn main() {
    let env = std::env::var("POLYGEN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    let converter = BasicPitchConverter::new(config.conversion.clone());
    if converter.is_available().await {
        tracing::info!(command = %config.conversion.command, "Converter command found");
    } else {
        tracing::warn!(
            command = %config.conversion.command,
            "Converter command not found; jobs will fail at the conversion stage"
        );
    }

    let converter: Arc<dyn MidiConverter> = Arc::new(converter);
    polygen_api::run_server(config, converter).await
}
