//! Background job configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the per-job background pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Directory under which per-job working areas are created.
    /// Defaults to the OS temporary directory.
    #[serde(default)]
    pub temp_root: Option<PathBuf>,
}

impl WorkerConfig {
    /// Resolve the directory that holds job working areas.
    pub fn resolved_temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }
}
