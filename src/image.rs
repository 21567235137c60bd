//! The shared image contract and its non-decoding implementation.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::ImageOptions;
use crate::diagnostics::{Diagnostics, SkippedOp};
use crate::error::{ImageError, Result};
use crate::formats::extract_dimensions_with;
use crate::types::{Dimensions, ImageFormat, Rect, ResizeMode};

pub type SaveFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// A drawing surface. Rendering backends implement this.
pub trait Canvas {
    fn bounds(&self) -> Rect;
}

/// Capabilities shared by every image handle, decoded or not.
///
/// Resampling operations consume an `Arc` so an implementation that
/// cannot resample can hand back the very same handle.
pub trait Image: Send + Sync + fmt::Debug {
    /// Width in pixels. Values above 2^24 are not exactly representable
    /// as `f32` and get rounded.
    fn width(&self) -> f32;

    /// Height in pixels, with the same `f32` rounding as [`Image::width`].
    fn height(&self) -> f32;

    /// Scales so that neither side exceeds `max_width_or_height`.
    fn downsize(self: Arc<Self>, max_width_or_height: f32) -> Arc<dyn Image>;

    fn downsize_to(self: Arc<Self>, max_width: f32, max_height: f32) -> Arc<dyn Image>;

    fn resize(self: Arc<Self>, width: f32, height: f32, mode: ResizeMode) -> Arc<dyn Image>;

    /// Writes the image to `sink` encoded as `format`.
    ///
    /// `quality` is in `0.0..=1.0` and only matters to lossy encoders.
    fn save(&self, sink: &mut dyn Write, format: ImageFormat, quality: f32) -> Result<()>;

    fn save_async<'a>(
        &'a self,
        sink: &'a mut (dyn AsyncWrite + Unpin + Send),
        format: ImageFormat,
        quality: f32,
    ) -> SaveFuture<'a>;

    fn draw(&self, canvas: &mut dyn Canvas, dirty_rect: Rect) -> Result<()>;

    /// Releases backend resources. Handles without any leave this as is.
    fn dispose(&self) {}
}

/// Image handle over raw encoded bytes.
///
/// Dimensions are read from the container framing once, at
/// construction. The bytes are never decoded, so only same-format
/// saves are possible and resampling is a no-op.
#[derive(Clone)]
pub struct VirtualImage {
    bytes: Bytes,
    format: ImageFormat,
    dimensions: Dimensions,
    diagnostics: Arc<dyn Diagnostics>,
}

impl VirtualImage {
    pub fn new(bytes: impl Into<Bytes>, format: ImageFormat) -> Result<Self> {
        Self::with_options(bytes, ImageOptions::new().with_format(format))
    }

    pub fn with_options(bytes: impl Into<Bytes>, options: ImageOptions) -> Result<Self> {
        let bytes = bytes.into();
        let dimensions = extract_dimensions_with(&bytes, options.format, options.png_baseline)?;

        if dimensions.is_empty() {
            tracing::debug!(format = %options.format, len = bytes.len(), "no dimensions found");
        } else {
            tracing::debug!(
                format = %options.format,
                len = bytes.len(),
                %dimensions,
                "virtual image created"
            );
        }

        Ok(Self {
            bytes,
            format: options.format,
            dimensions,
            diagnostics: options.diagnostics,
        })
    }

    /// The encoded buffer exactly as supplied.
    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn save_to_path(&self, path: &Path, format: ImageFormat, quality: f32) -> Result<()> {
        self.ensure_format(format)?;
        let mut file = File::create(path)?;
        self.save(&mut file, format, quality)
    }

    fn ensure_format(&self, format: ImageFormat) -> Result<()> {
        if format == self.format {
            Ok(())
        } else {
            Err(ImageError::UnsupportedConversion {
                from: self.format,
                to: format,
            })
        }
    }
}

impl fmt::Debug for VirtualImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualImage")
            .field("format", &self.format)
            .field("dimensions", &self.dimensions)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PartialEq for VirtualImage {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
            && self.dimensions == other.dimensions
            && self.bytes == other.bytes
    }
}

impl Eq for VirtualImage {}

impl Image for VirtualImage {
    fn width(&self) -> f32 {
        self.dimensions.width as f32
    }

    fn height(&self) -> f32 {
        self.dimensions.height as f32
    }

    fn downsize(self: Arc<Self>, _max_width_or_height: f32) -> Arc<dyn Image> {
        self.diagnostics.skipped(SkippedOp::Downsize, self.format);
        self
    }

    fn downsize_to(self: Arc<Self>, _max_width: f32, _max_height: f32) -> Arc<dyn Image> {
        self.diagnostics.skipped(SkippedOp::Downsize, self.format);
        self
    }

    fn resize(self: Arc<Self>, _width: f32, _height: f32, _mode: ResizeMode) -> Arc<dyn Image> {
        self.diagnostics.skipped(SkippedOp::Resize, self.format);
        self
    }

    fn save(&self, sink: &mut dyn Write, format: ImageFormat, _quality: f32) -> Result<()> {
        self.ensure_format(format)?;
        sink.write_all(&self.bytes)?;
        Ok(())
    }

    fn save_async<'a>(
        &'a self,
        sink: &'a mut (dyn AsyncWrite + Unpin + Send),
        format: ImageFormat,
        _quality: f32,
    ) -> SaveFuture<'a> {
        Box::pin(async move {
            self.ensure_format(format)?;
            sink.write_all(&self.bytes).await?;
            Ok(())
        })
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _dirty_rect: Rect) -> Result<()> {
        Err(ImageError::UnsupportedOperation(
            "drawing a virtual image is not supported",
        ))
    }
}
