//! High-level, ergonomic library API: slice single volumes or whole
//! directory trees, and drive Stage A series-to-volume conversion. Prefer
//! these entrypoints over the low-level processing modules when embedding
//! medslice.
use std::fs;
use std::path::Path;

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::params::{ConvertParams, SliceParams};
use crate::core::processing::normalize::normalize_volume;
use crate::core::processing::pipeline::process_volume;
use crate::core::processing::rasterize::rasterize_volume;
use crate::error::{Error, Result};
use crate::io::{SeriesConverter, find_series_dirs, find_volumes, load_volume};
use crate::types::{TaskOutcome, VOLUME_EXTENSION};

/// Aggregate result of a slicing batch. Outcomes are kept in discovery
/// order regardless of which worker finished first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<TaskOutcome>) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        Self {
            processed: outcomes.len() - failed,
            failed,
            outcomes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }
}

/// Aggregate result of a Stage A conversion run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConvertReport {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Slices a single volume into `output_dir`. Returns the slice count.
pub fn slice_volume(input: &Path, output_dir: &Path, target_size: usize) -> Result<usize> {
    let volume = load_volume(input)?;
    let normalized = normalize_volume(&volume);
    drop(volume);
    rasterize_volume(&normalized, output_dir, target_size)
}

/// Slices every `.nii.gz` volume under `input_root` into a mirrored
/// directory tree under `output_root`. See
/// [`slice_directory_with_progress`] for the full contract.
pub fn slice_directory(
    input_root: &Path,
    output_root: &Path,
    params: &SliceParams,
) -> Result<BatchReport> {
    slice_directory_with_progress(input_root, output_root, params, &ProgressBar::hidden())
}

/// Batch coordinator for the slicing stage.
///
/// A missing input root is batch-fatal; an input root without volumes
/// yields an empty report ("nothing to do"). Each discovered volume is
/// dispatched to its own worker; per-volume failures come back as
/// [`TaskOutcome::Failure`] entries in the report and never abort the
/// batch. Workers write to disjoint subdirectories, so no locking is
/// involved anywhere.
pub fn slice_directory_with_progress(
    input_root: &Path,
    output_root: &Path,
    params: &SliceParams,
    progress: &ProgressBar,
) -> Result<BatchReport> {
    if params.target_size == 0 {
        return Err(Error::ZeroSize {
            size: params.target_size,
        });
    }
    if !input_root.exists() {
        return Err(Error::MissingInputRoot {
            path: input_root.to_path_buf(),
        });
    }
    fs::create_dir_all(output_root)?;

    let volumes = find_volumes(input_root);
    if volumes.is_empty() {
        info!(
            "no {} files found under {}, nothing to do",
            VOLUME_EXTENSION,
            input_root.display()
        );
        return Ok(BatchReport::default());
    }

    let workers = params.workers.unwrap_or_else(default_workers);
    info!(
        volumes = volumes.len(),
        workers, "starting slicing batch from {}", input_root.display()
    );
    progress.set_length(volumes.len() as u64);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(Error::external)?;

    // Ordered map over the task list: completion order may differ, the
    // report keeps discovery order.
    let outcomes: Vec<TaskOutcome> = pool.install(|| {
        volumes
            .par_iter()
            .map(|path| {
                let outcome =
                    process_volume(path, input_root, output_root, params.target_size);
                progress.inc(1);
                outcome
            })
            .collect()
    });

    Ok(BatchReport::new(outcomes))
}

/// Converts every discovered DICOM series under `raw_root` into a `.nii.gz`
/// file under `output_root`. See [`convert_directory_with_progress`].
pub fn convert_directory(
    raw_root: &Path,
    output_root: &Path,
    converter: &dyn SeriesConverter,
    params: &ConvertParams,
) -> Result<ConvertReport> {
    convert_directory_with_progress(raw_root, output_root, converter, params, &ProgressBar::hidden())
}

/// Stage A coordinator: mirrors the relative layout of `SE*` series
/// directories under `output_root`, naming each output after its series
/// directory. Existing outputs are skipped unless `overwrite` is set; this
/// is the resumable stage. Per-series failures are logged and counted,
/// never fatal.
pub fn convert_directory_with_progress(
    raw_root: &Path,
    output_root: &Path,
    converter: &dyn SeriesConverter,
    params: &ConvertParams,
    progress: &ProgressBar,
) -> Result<ConvertReport> {
    if !raw_root.exists() {
        return Err(Error::MissingInputRoot {
            path: raw_root.to_path_buf(),
        });
    }
    fs::create_dir_all(output_root)?;
    if params.create_labels_dir {
        if let Some(parent) = output_root.parent() {
            fs::create_dir_all(parent.join("labels"))?;
        }
    }

    let series = find_series_dirs(raw_root);
    if series.is_empty() {
        info!("no series directories found under {}, nothing to do", raw_root.display());
        return Ok(ConvertReport::default());
    }

    info!(series = series.len(), "starting series conversion from {}", raw_root.display());
    progress.set_length(series.len() as u64);

    let mut report = ConvertReport::default();
    for series_dir in &series {
        progress.inc(1);
        let relative = series_dir
            .strip_prefix(raw_root)
            .map_err(Error::external)?;
        let series_name = series_dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidArgument {
                arg: "series",
                value: series_dir.display().to_string(),
            })?;

        let mut output = output_root.to_path_buf();
        if let Some(parent) = relative.parent() {
            output.push(parent);
        }
        output.push(format!("{}{}", series_name, VOLUME_EXTENSION));

        if output.exists() && !params.overwrite {
            report.skipped += 1;
            continue;
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        match converter.convert(series_dir, &output) {
            Ok(()) => report.converted += 1,
            Err(e) => {
                warn!(series = %series_dir.display(), "conversion failed: {e}");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ConvertError;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct TouchConverter {
        calls: Mutex<Vec<PathBuf>>,
    }

    impl TouchConverter {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl SeriesConverter for TouchConverter {
        fn convert(&self, series_dir: &Path, output: &Path) -> std::result::Result<(), ConvertError> {
            self.calls.lock().unwrap().push(series_dir.to_path_buf());
            fs::write(output, b"volume")?;
            Ok(())
        }
    }

    #[test]
    fn missing_input_root_is_batch_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = slice_directory(
            &dir.path().join("absent"),
            &dir.path().join("out"),
            &SliceParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingInputRoot { .. }));
    }

    #[test]
    fn empty_input_root_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        fs::create_dir_all(&input).unwrap();

        let report =
            slice_directory(&input, &dir.path().join("out"), &SliceParams::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn convert_mirrors_structure_and_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        let out = dir.path().join("nii").join("images");
        fs::create_dir_all(raw.join("patient1/SE001")).unwrap();
        fs::create_dir_all(raw.join("patient2/SE002")).unwrap();

        let converter = TouchConverter::new();
        let params = ConvertParams::default();

        let report = convert_directory(&raw, &out, &converter, &params).unwrap();
        assert_eq!(report.converted, 2);
        assert_eq!(report.skipped, 0);
        assert!(out.join("patient1/SE001.nii.gz").is_file());
        assert!(out.join("patient2/SE002.nii.gz").is_file());
        assert!(dir.path().join("nii/labels").is_dir());

        // Second run finds both outputs in place and converts nothing.
        let report = convert_directory(&raw, &out, &converter, &params).unwrap();
        assert_eq!(report.converted, 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(converter.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn failing_series_is_counted_not_fatal() {
        struct FailConverter;
        impl SeriesConverter for FailConverter {
            fn convert(&self, _: &Path, _: &Path) -> std::result::Result<(), ConvertError> {
                Err(ConvertError::CommandFailed {
                    program: "dcm2nii".into(),
                    status: "exit status: 1".into(),
                    stderr: "corrupt series".into(),
                })
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(raw.join("SE001")).unwrap();

        let report = convert_directory(
            &raw,
            &dir.path().join("out"),
            &FailConverter,
            &ConvertParams::default(),
        )
        .unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.converted, 0);
    }
}
