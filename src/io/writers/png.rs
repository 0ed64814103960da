use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};

/// Writes an interleaved RGB8 buffer as a lossless PNG.
pub fn write_rgb_png(output: &Path, cols: usize, rows: usize, rgb_data: &[u8]) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    encoder
        .write_image(rgb_data, cols as u32, rows as u32, ExtendedColorType::Rgb8)
        .map_err(Error::external)?;
    Ok(())
}
