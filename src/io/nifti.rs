//! NIfTI volume loading on top of the `nifti` crate.
use std::path::Path;

use ndarray::{Array3, ArrayD, Ix3};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("failed to read NIfTI file: {0}")]
    Read(#[from] nifti::error::NiftiError),

    #[error("expected a 3D volume, got shape {shape:?}")]
    NotThreeDimensional { shape: Vec<usize> },
}

/// Loads one volume as `f32` with the slice axis first.
///
/// NIfTI stores the fastest-varying spatial axis first; the annotation
/// pipeline slices along the slowest one, so the axes are reversed after
/// loading to put the slice axis at position 0.
pub fn load_volume(path: &Path) -> Result<Array3<f32>, VolumeError> {
    let object = ReaderOptions::new().read_file(path)?;
    let volume: ArrayD<f32> = object.into_volume().into_ndarray::<f32>()?;

    let shape = volume.shape().to_vec();
    let volume: Array3<f32> = volume
        .into_dimensionality::<Ix3>()
        .map_err(|_| VolumeError::NotThreeDimensional { shape })?;

    let volume = volume.reversed_axes();
    debug!(path = %path.display(), shape = ?volume.dim(), "loaded volume");
    Ok(volume)
}
