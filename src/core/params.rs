use serde::{Deserialize, Serialize};

/// Slicing parameters suitable for config files and presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceParams {
    /// Side length of the square output rasters, in pixels.
    pub target_size: usize,
    /// Worker threads for the batch pool; None means one per available
    /// processing unit.
    pub workers: Option<usize>,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self {
            target_size: 1024,
            workers: None,
        }
    }
}

/// Stage A (series-to-volume) parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertParams {
    /// Re-convert series whose output file already exists.
    pub overwrite: bool,
    /// Create an empty `labels` directory next to the output root.
    pub create_labels_dir: bool,
}

impl Default for ConvertParams {
    fn default() -> Self {
        Self {
            overwrite: false,
            create_labels_dir: true,
        }
    }
}
