#![doc = r#"
medslice — prepares volumetric medical scans for manual annotation.

This crate turns a tree of 3D medical volumes into trees of normalized,
annotation-tool-compatible 2D image slices. It works in two stages: `convert`
wraps an external DICOM-series-to-NIfTI converter and mirrors the raw
directory structure (skipping series already converted), and `slice` fans
each `.nii.gz` volume out to a worker pool that applies percentile-based
contrast normalization, grayscale-to-RGB channel expansion, a deterministic
cubic resize to a fixed square resolution, and lossless PNG output. It powers
the medslice CLI and can be embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases. It is robust in
the workflows exercised by the CLI, but may evolve as the crate stabilizes.
Breaking changes can occur.

Quick start: slice a directory tree
-----------------------------------
```rust,no_run
use std::path::Path;
use medslice::{SliceParams, slice_directory};

fn main() -> medslice::Result<()> {
    let params = SliceParams {
        target_size: 1024,
        workers: None, // one worker per available processing unit
    };

    let report = slice_directory(
        Path::new("/data/nii/images"),
        Path::new("/data/pred/images"),
        &params,
    )?;

    println!("processed={} failed={}", report.processed, report.failed);
    for failure in report.failures() {
        eprintln!("{failure}");
    }
    Ok(())
}
```

Each volume at `A/B/scan1.nii.gz` lands under `<output_root>/A/B/scan1/` as
`slice_000.png`, `slice_001.png`, ... — 1024x1024, 3-channel, 8-bit PNGs
ready for a semi-automatic annotation tool. Per-volume failures are reported
as data in the batch report; a corrupt volume never aborts its siblings.

Slice a single volume
---------------------
```rust,no_run
use std::path::Path;
use medslice::slice_volume;

fn main() -> medslice::Result<()> {
    let written = slice_volume(
        Path::new("/data/nii/images/scan1.nii.gz"),
        Path::new("/out/scan1"),
        1024,
    )?;
    println!("wrote {written} slices");
    Ok(())
}
```

Stage A: convert raw series
---------------------------
```rust,no_run
use std::path::Path;
use medslice::{CommandConverter, ConvertParams, convert_directory};

fn main() -> medslice::Result<()> {
    let converter = CommandConverter::new("dcm2niix");
    let report = convert_directory(
        Path::new("/data/raw_mri"),
        Path::new("/data/nii/images"),
        &converter,
        &ConvertParams::default(),
    )?;
    println!("converted={} skipped={}", report.converted, report.skipped);
    Ok(())
}
```

Error handling
--------------
All public functions return `medslice::Result<T>`; match on
`medslice::Error` to handle specific cases. Only batch-level conditions (a
missing input root, an unusable output tree) surface as errors — per-item
failures are collected in the reports.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — `TaskOutcome` and shared naming constants.
- [`io`] — NIfTI loading, series discovery, and raster writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{ConvertParams, SliceParams};
pub use error::{Error, Result};
pub use types::{TaskOutcome, VOLUME_EXTENSION};

// Readers and collaborators
pub use io::nifti::{VolumeError, load_volume};
pub use io::series::{CommandConverter, ConvertError, SeriesConverter};

// High-level API re-exports
pub use api::{
    BatchReport, ConvertReport, convert_directory, convert_directory_with_progress,
    slice_directory, slice_directory_with_progress, slice_volume,
};
