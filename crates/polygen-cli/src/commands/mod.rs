//! CLI command definitions and dispatch.

pub mod config;
pub mod health;
pub mod submit;

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use polygen_core::error::AppError;

/// Polygen: audio-to-MIDI conversion service tooling
#[derive(Debug, Parser)]
#[command(name = "polygen", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/<env>.toml`)
    #[arg(short, long, env = "POLYGEN_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a test job to a running service
    Submit(submit::SubmitArgs),
    /// Query a running service's health endpoint
    Health(health::HealthArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Submit(args) => submit::execute(args).await,
            Commands::Health(args) => health::execute(args, self.format).await,
            Commands::Config(args) => config::execute(args, &self.env, self.format).await,
        }
    }
}

/// Helper: HTTP client for talking to a service
pub fn http_client(timeout_seconds: u64) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))
}
