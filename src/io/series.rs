//! DICOM series discovery and the external series-to-volume converter
//! interface used by Stage A.
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::types::{SERIES_DIR_PREFIX, VOLUME_EXTENSION};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("converter `{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Turns one DICOM series directory into a single volumetric file.
///
/// The conversion itself is an external collaborator; implementations only
/// promise that after a successful call `output` holds a readable volume.
pub trait SeriesConverter {
    fn convert(&self, series_dir: &Path, output: &Path) -> Result<(), ConvertError>;
}

/// Default converter: invokes an external program as
/// `<program> <series_dir> <output>`.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SeriesConverter for CommandConverter {
    fn convert(&self, series_dir: &Path, output: &Path) -> Result<(), ConvertError> {
        debug!(program = %self.program, series = %series_dir.display(), "converting series");
        let result = Command::new(&self.program)
            .arg(series_dir)
            .arg(output)
            .output()?;

        if !result.status.success() {
            return Err(ConvertError::CommandFailed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Recursively finds DICOM series directories (name starts with `SE`) under
/// `root`, in deterministic file-name order.
pub fn find_series_dirs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with(SERIES_DIR_PREFIX))
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Recursively finds `.nii.gz` volumes under `root`, in deterministic
/// file-name order. This order fixes the order of the batch report.
pub fn find_volumes(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(VOLUME_EXTENSION))
        })
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_volumes_recursively_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/scan2.nii.gz"), b"x").unwrap();
        fs::write(dir.path().join("scan1.nii.gz"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let found = find_volumes(dir.path());
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["scan2.nii.gz", "scan1.nii.gz"]);
    }

    #[test]
    fn finds_only_series_prefixed_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("patient1/SE001")).unwrap();
        fs::create_dir_all(dir.path().join("patient1/misc")).unwrap();
        fs::create_dir_all(dir.path().join("patient2/SE002")).unwrap();

        let found = find_series_dirs(dir.path());
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| {
            p.file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("SE")
        }));
    }
}
