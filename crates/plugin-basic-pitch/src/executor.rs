//! Child-process execution for the external converter.
//!
//! Runs the converter with captured output, optional timeout, and
//! `kill_on_drop` so an abandoned job never leaves a stray process.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing;

use crate::error::ConversionError;

/// Longest stderr tail kept in an error.
const MAX_STDERR_CHARS: usize = 2000;

/// Parameters for one converter invocation
#[derive(Debug, Clone)]
pub struct ExecutionParams {
    /// The command to execute
    pub command: String,
    /// Arguments, already fully expanded
    pub args: Vec<String>,
    /// Working directory
    pub working_dir: Option<PathBuf>,
    /// Upper bound on run time; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

/// Captured outcome of a successful invocation
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Standard output from the process
    pub stdout: String,
    /// Standard error from the process
    pub stderr: String,
    /// Wall-clock duration
    pub duration_ms: u64,
}

/// Executor for running the external conversion command
#[derive(Debug, Clone, Default)]
pub struct ConversionExecutor;

impl ConversionExecutor {
    /// Create a new conversion executor
    pub fn new() -> Self {
        Self
    }

    /// Run the command and wait for it to exit
    pub async fn execute(&self, params: &ExecutionParams) -> Result<ExecutionResult, ConversionError> {
        let start = Instant::now();

        tracing::info!(
            command = %params.command,
            args = ?params.args,
            "Executing converter"
        );

        let mut cmd = Command::new(&params.command);
        cmd.args(&params.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = params.working_dir {
            cmd.current_dir(dir);
        }

        let output = match params.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::error!(
                        command = %params.command,
                        timeout_seconds = limit.as_secs(),
                        "Converter timed out"
                    );
                    return Err(ConversionError::Timeout {
                        timeout_seconds: limit.as_secs(),
                    });
                }
            },
            None => cmd.output().await,
        };

        let output = output.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConversionError::CommandNotFound {
                    command: params.command.clone(),
                }
            } else {
                ConversionError::Io(e)
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            tracing::error!(
                command = %params.command,
                exit_code = code,
                stderr = %tail(&stderr, 500),
                "Converter failed"
            );
            return Err(ConversionError::ProcessFailed {
                code,
                stderr: tail(&stderr, MAX_STDERR_CHARS),
            });
        }

        Ok(ExecutionResult {
            stdout,
            stderr,
            duration_ms,
        })
    }

    /// Check if a command is available on the system
    pub async fn check_command_available(&self, command: &str) -> bool {
        if command.contains(std::path::MAIN_SEPARATOR) {
            return tokio::fs::metadata(command).await.is_ok();
        }

        let lookup = if cfg!(target_os = "windows") {
            "where"
        } else {
            "which"
        };

        match Command::new(lookup)
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(_) => false,
        }
    }
}

/// Last `max` characters of `text`, trimmed.
pub(crate) fn tail(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    trimmed.chars().skip(count.saturating_sub(max)).collect()
}
