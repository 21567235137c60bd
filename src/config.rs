use std::sync::Arc;

use crate::diagnostics::{Diagnostics, default_diagnostics};
use crate::formats::PngBaseline;
use crate::types::ImageFormat;

/// Construction-time settings for a [`VirtualImage`](crate::VirtualImage).
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub format: ImageFormat,
    pub png_baseline: PngBaseline,
    pub diagnostics: Arc<dyn Diagnostics>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            png_baseline: PngBaseline::default(),
            diagnostics: default_diagnostics(),
        }
    }
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Read PNG dimensions from the IHDR payload of a full file instead
    /// of the first 8 bytes of the buffer.
    pub fn with_png_baseline(mut self, baseline: PngBaseline) -> Self {
        self.png_baseline = baseline;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticStats;

    #[test]
    fn test_options_defaults() {
        let options = ImageOptions::default();
        assert_eq!(options.format, ImageFormat::Png);
        assert_eq!(options.png_baseline, PngBaseline::BufferStart);
    }

    #[test]
    fn test_options_builder() {
        let stats = DiagnosticStats::shared();
        let options = ImageOptions::new()
            .with_format(ImageFormat::Jpeg)
            .with_png_baseline(PngBaseline::IhdrPayload)
            .with_diagnostics(stats.clone());

        assert_eq!(options.format, ImageFormat::Jpeg);
        assert_eq!(options.png_baseline, PngBaseline::IhdrPayload);
        assert_eq!(Arc::strong_count(&stats), 2);
    }
}
