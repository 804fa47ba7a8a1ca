//! Per-job temporary working area.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing;

use polygen_core::error::AppError;
use polygen_core::result::AppResult;
use polygen_core::types::JobId;

/// An exclusively owned directory holding one job's audio and MIDI files.
///
/// Removed by [`JobWorkspace::cleanup`]; dropping it without cleanup still
/// removes it on a best-effort basis.
#[derive(Debug)]
pub struct JobWorkspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl JobWorkspace {
    /// Create a fresh `job_<id>_XXXX` directory under `root`, creating
    /// `root` itself when missing.
    pub async fn create(root: &Path, job_id: &JobId) -> AppResult<Self> {
        tokio::fs::create_dir_all(root).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create temp root '{}': {e}",
                root.display()
            ))
        })?;

        let prefix = format!("job_{}_", sanitize(job_id.as_str()));
        let root_buf = root.to_path_buf();
        let dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new().prefix(&prefix).tempdir_in(&root_buf)
        })
        .await
        .map_err(|e| AppError::internal(format!("Workspace task failed: {e}")))?
        .map_err(|e| {
            AppError::storage(format!(
                "Failed to create working directory in '{}': {e}",
                root.display()
            ))
        })?;
        let path = dir.path().to_path_buf();

        tracing::debug!(job_id = %job_id, path = %path.display(), "Created job workspace");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory. Safe to call more than once, and a directory
    /// that has already disappeared is not an error.
    pub async fn cleanup(&mut self) -> AppResult<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };

        let result = tokio::task::spawn_blocking(move || dir.close())
            .await
            .map_err(|e| AppError::internal(format!("Cleanup task failed: {e}")))?;

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keep job ids from escaping the temp root or producing odd names.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
