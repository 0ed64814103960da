//! I/O layer: NIfTI volume loading, DICOM series discovery with the
//! external converter interface, and raster `writers`.
pub mod nifti;
pub use nifti::{VolumeError, load_volume};

pub mod series;
pub use series::{CommandConverter, ConvertError, SeriesConverter, find_series_dirs, find_volumes};

pub mod writers;
