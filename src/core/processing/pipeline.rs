use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::processing::normalize::normalize_volume;
use crate::core::processing::rasterize::rasterize_volume;
use crate::error::{Error, Result};
use crate::io::load_volume;
use crate::types::{TaskOutcome, VOLUME_EXTENSION};

/// Derives the slice directory for `input`: its path relative to
/// `input_root`, mirrored under `output_root`, with the `.nii.gz`
/// extension stripped so the volume name becomes a directory.
pub fn slice_output_dir(input: &Path, input_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = input.strip_prefix(input_root).map_err(|_| Error::InvalidArgument {
        arg: "input",
        value: format!("{} is not under the input root", input.display()),
    })?;
    let file_name = relative
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidArgument {
            arg: "input",
            value: input.display().to_string(),
        })?;
    let stem = file_name.strip_suffix(VOLUME_EXTENSION).unwrap_or(file_name);

    let mut dir = output_root.to_path_buf();
    if let Some(parent) = relative.parent() {
        dir.push(parent);
    }
    dir.push(stem);
    Ok(dir)
}

fn run(input: &Path, input_root: &Path, output_root: &Path, target_size: usize) -> Result<()> {
    let output_dir = slice_output_dir(input, input_root, output_root)?;
    let volume = load_volume(input)?;
    let normalized = normalize_volume(&volume);
    drop(volume);
    let written = rasterize_volume(&normalized, &output_dir, target_size)?;
    debug!(path = %input.display(), slices = written, "volume sliced");
    Ok(())
}

/// Runs the full normalize-then-rasterize pipeline for one volume.
///
/// Always overwrites existing slices; Stage A is the resumable stage, the
/// slicing stage is not. Never lets an error cross the worker boundary:
/// every failure comes back as `TaskOutcome::Failure`.
pub fn process_volume(
    input: &Path,
    input_root: &Path,
    output_root: &Path,
    target_size: usize,
) -> TaskOutcome {
    match run(input, input_root, output_root, target_size) {
        Ok(()) => TaskOutcome::Success {
            path: input.to_path_buf(),
        },
        Err(e) => {
            warn!(path = %input.display(), "volume failed: {e}");
            TaskOutcome::Failure {
                path: input.to_path_buf(),
                detail: e.to_string(),
            }
        }
    }
}
