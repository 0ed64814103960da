use std::fs;
use std::path::Path;

use ndarray::{Array3, Axis};
use tracing::debug;

use crate::core::processing::resize::resize_rgb8;
use crate::error::Result;
use crate::io::writers::png::write_rgb_png;

/// Turns a normalized volume into a stack of square RGB PNG files under
/// `output_dir`, one per plane along axis 0, named `slice_<index:03>.png`.
///
/// The grayscale plane is replicated across three interleaved channels
/// before resizing, matching what the downstream annotation tool expects.
/// Returns the number of slices written.
pub fn rasterize_volume(volume: &Array3<u8>, output_dir: &Path, target_size: usize) -> Result<usize> {
    fs::create_dir_all(output_dir)?;

    let num_slices = volume.len_of(Axis(0));
    debug!(slices = num_slices, dir = %output_dir.display(), "rasterizing volume");

    for index in 0..num_slices {
        let plane = volume.index_axis(Axis(0), index);
        let (rows, cols) = plane.dim();

        let mut rgb = Vec::with_capacity(rows * cols * 3);
        for &v in plane.iter() {
            rgb.extend_from_slice(&[v, v, v]);
        }

        let resized = resize_rgb8(&rgb, cols, rows, target_size)?;
        let slice_path = output_dir.join(format!("slice_{:03}.png", index));
        write_rgb_png(&slice_path, target_size, target_size, &resized)?;
    }

    Ok(num_slices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn writes_one_png_per_plane_with_padded_names() {
        let dir = tempfile::tempdir().unwrap();
        let volume = Array3::<u8>::from_shape_fn((5, 6, 7), |(i, j, k)| (i + j + k) as u8);

        let written = rasterize_volume(&volume, dir.path(), 16).unwrap();
        assert_eq!(written, 5);

        for i in 0..5 {
            let path = dir.path().join(format!("slice_{:03}.png", i));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }

    #[test]
    fn slices_come_out_square_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let volume = Array3::<u8>::from_elem((1, 9, 4), 77);

        rasterize_volume(&volume, dir.path(), 24).unwrap();

        let img = image::open(dir.path().join("slice_000.png")).unwrap();
        assert_eq!(img.width(), 24);
        assert_eq!(img.height(), 24);
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let volume = Array3::<u8>::zeros((2, 4, 4));

        rasterize_volume(&volume, &nested, 8).unwrap();
        assert!(nested.join("slice_001.png").is_file());
    }
}
