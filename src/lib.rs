//! Lightweight image handle over encoded PNG/JPEG bytes.
//!
//! [`VirtualImage`] reads pixel dimensions straight from the container
//! framing without a codec and implements the [`Image`] contract with
//! verbatim saves and no-op resampling.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod image;
pub mod types;

pub use config::ImageOptions;
pub use diagnostics::{
    DiagnosticStats, Diagnostics, SilentDiagnostics, SkippedOp, TracingDiagnostics,
    default_diagnostics,
};
pub use error::{ImageError, Result};
pub use formats::{PngBaseline, extract_dimensions, extract_dimensions_with};
pub use image::{Canvas, Image, SaveFuture, VirtualImage};
pub use types::{Dimensions, ImageFormat, Rect, ResizeMode};
