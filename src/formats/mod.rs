//! Container-level dimension extraction.
//!
//! Nothing here decodes pixels: each format walks its framing just far
//! enough to find the width/height fields.

pub mod jpeg;
pub mod png;
pub mod reader;

use crate::error::Result;
use crate::types::{Dimensions, ImageFormat};

pub use jpeg::jpeg_dimensions;
pub use png::{PngBaseline, png_dimensions, png_dimensions_with};

/// Extracts pixel dimensions from `data`, trusting `format`.
///
/// A well-formed buffer with no dimension marker gives `(0, 0)`; only a
/// read past the end of `data` is an error. PNG is read from the start
/// of the buffer.
pub fn extract_dimensions(data: &[u8], format: ImageFormat) -> Result<Dimensions> {
    extract_dimensions_with(data, format, PngBaseline::default())
}

pub fn extract_dimensions_with(
    data: &[u8],
    format: ImageFormat,
    png_baseline: PngBaseline,
) -> Result<Dimensions> {
    match format {
        ImageFormat::Png => png_dimensions_with(data, png_baseline),
        ImageFormat::Jpeg => jpeg_dimensions(data),
    }
}
