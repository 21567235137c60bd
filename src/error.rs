use std::io;
use thiserror::Error;

use crate::types::ImageFormat;

/// Errors raised by dimension extraction and the image contract
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Cannot convert {from} image to {to}: conversion requires decoding")]
    UnsupportedConversion { from: ImageFormat, to: ImageFormat },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error(
        "{format} data truncated: needed {requested} bytes at offset {offset}, buffer holds {available}"
    )]
    BoundsViolation {
        format: ImageFormat,
        offset: usize,
        requested: usize,
        available: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ImageError {
    /// True when the buffer ended before the scan could finish.
    pub fn is_truncated(&self) -> bool {
        matches!(self, ImageError::BoundsViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
