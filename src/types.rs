//! Shared types used across medslice.
//! Includes the per-volume `TaskOutcome` sum type and the file-naming
//! constants shared by both pipeline stages.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Multi-part extension of the volumetric input files.
pub const VOLUME_EXTENSION: &str = ".nii.gz";

/// Leading characters of a DICOM series directory name.
pub const SERIES_DIR_PREFIX: &str = "SE";

/// Result of processing one volume, returned as data across the worker
/// boundary. Failures carry the source path and a human-readable detail
/// and never propagate as panics or errors to the batch coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskOutcome {
    Success { path: PathBuf },
    Failure { path: PathBuf, detail: String },
}

impl TaskOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            TaskOutcome::Success { path } => path,
            TaskOutcome::Failure { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failure { .. })
    }
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskOutcome::Success { path } => write!(f, "ok: {}", path.display()),
            TaskOutcome::Failure { path, detail } => {
                write!(f, "failed: {}: {}", path.display(), detail)
            }
        }
    }
}
