use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};

use crate::error::{Error, Result};

/// Resizes an interleaved RGB8 buffer to a square of `target_size` pixels
/// using cubic convolution. Convolution-based resampling is anti-aliased by
/// construction and preserves the 8-bit value range, so the same input
/// always yields the same output bytes.
pub fn resize_rgb8(
    data: &[u8],
    original_cols: usize,
    original_rows: usize,
    target_size: usize,
) -> Result<Vec<u8>> {
    if target_size == 0 {
        return Err(Error::ZeroSize { size: target_size });
    }

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols as u32,
        original_rows as u32,
        data.to_vec(),
        PixelType::U8x3,
    )
    .map_err(Error::external)?;
    let mut dst_image = Image::new(target_size as u32, target_size as u32, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    Ok(dst_image.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_has_square_rgb_dimensions() {
        let src = vec![128u8; 7 * 5 * 3];
        let out = resize_rgb8(&src, 7, 5, 16).unwrap();
        assert_eq!(out.len(), 16 * 16 * 3);
    }

    #[test]
    fn uniform_input_stays_uniform() {
        let src = vec![200u8; 10 * 10 * 3];
        let out = resize_rgb8(&src, 10, 10, 4).unwrap();
        assert!(out.iter().all(|&v| v == 200));
    }

    #[test]
    fn resize_is_deterministic() {
        let src: Vec<u8> = (0..12 * 9 * 3).map(|i| (i % 251) as u8).collect();
        let a = resize_rgb8(&src, 12, 9, 32).unwrap();
        let b = resize_rgb8(&src, 12, 9, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_target_is_rejected() {
        let src = vec![0u8; 3];
        assert!(resize_rgb8(&src, 1, 1, 0).is_err());
    }
}
