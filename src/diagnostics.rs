//! Observers for contract calls that a non-decoding handle skips.
//!
//! A [`VirtualImage`](crate::VirtualImage) cannot resample pixels, so
//! downsize and resize return the handle untouched. Those calls are
//! reported here instead of being silently swallowed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::ImageFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedOp {
    Downsize,
    Resize,
}

impl SkippedOp {
    pub fn name(&self) -> &'static str {
        match self {
            SkippedOp::Downsize => "downsize",
            SkippedOp::Resize => "resize",
        }
    }
}

impl fmt::Display for SkippedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives a notification each time a resampling call is skipped.
pub trait Diagnostics: Send + Sync + fmt::Debug {
    fn skipped(&self, op: SkippedOp, format: ImageFormat);
}

/// Emits a debug-level `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn skipped(&self, op: SkippedOp, format: ImageFormat) {
        tracing::debug!(%op, %format, "{op} not supported in virtual image");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn skipped(&self, _op: SkippedOp, _format: ImageFormat) {}
}

/// Counts skipped calls.
#[derive(Debug, Default)]
pub struct DiagnosticStats {
    pub downsize: AtomicUsize,
    pub resize: AtomicUsize,
}

impl DiagnosticStats {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn total(&self) -> usize {
        self.downsize.load(Ordering::Relaxed) + self.resize.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> String {
        format!(
            "Skipped operations: {} (downsize: {}, resize: {})",
            self.total(),
            self.downsize.load(Ordering::Relaxed),
            self.resize.load(Ordering::Relaxed)
        )
    }
}

impl Diagnostics for DiagnosticStats {
    fn skipped(&self, op: SkippedOp, _format: ImageFormat) {
        match op {
            SkippedOp::Downsize => {
                self.downsize.fetch_add(1, Ordering::Relaxed);
            }
            SkippedOp::Resize => {
                self.resize.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// `TracingDiagnostics` in debug builds, `SilentDiagnostics` in release.
pub fn default_diagnostics() -> Arc<dyn Diagnostics> {
    if cfg!(debug_assertions) {
        Arc::new(TracingDiagnostics)
    } else {
        Arc::new(SilentDiagnostics)
    }
}
