use super::reader::{ByteReader, be_u16_at};
use crate::error::Result;
use crate::types::{Dimensions, ImageFormat};

pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

pub const MARKER_SOI: u8 = 0xD8;
pub const MARKER_EOI: u8 = 0xD9;
pub const MARKER_DRI: u8 = 0xDD;
pub const MARKER_SOF0: u8 = 0xC0;

/// Restart-interval payload is always two bytes.
const DRI_PAYLOAD_LEN: usize = 2;

/// Payload length of a segment, excluding marker and length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentLength {
    /// SOI and EOI carry nothing after the marker.
    Standalone,
    /// DRI has a fixed payload and no length field is consumed.
    Fixed(usize),
    /// Everything else reads a big-endian length that counts itself.
    Prefixed,
}

impl SegmentLength {
    #[inline]
    pub fn of(marker: u8) -> Self {
        match marker {
            MARKER_SOI | MARKER_EOI => Self::Standalone,
            MARKER_DRI => Self::Fixed(DRI_PAYLOAD_LEN),
            _ => Self::Prefixed,
        }
    }
}

/// Walks marker segments until the baseline SOF or EOI.
///
/// SOF0 payload is `precision, height(2), width(2), ...`; height and
/// width are read in that on-wire order. Reaching EOI without a SOF0
/// yields `(0, 0)`. Running out of bytes first is a bounds violation.
pub fn jpeg_dimensions(data: &[u8]) -> Result<Dimensions> {
    let mut reader = ByteReader::new(data, ImageFormat::Jpeg);

    loop {
        let offset = reader.position();
        // Prefix byte, expected 0xFF but never checked
        reader.read_u8()?;
        let marker = reader.read_u8()?;

        let len = match SegmentLength::of(marker) {
            SegmentLength::Standalone => 0,
            SegmentLength::Fixed(len) => len,
            SegmentLength::Prefixed => usize::from(reader.read_u16_be()?).saturating_sub(2),
        };

        tracing::trace!(offset, marker, len, "jpeg segment");

        if len > 0 {
            let payload = reader.take(len)?;
            if marker == MARKER_SOF0 {
                let height = be_u16_at(payload, 1, ImageFormat::Jpeg)?;
                let width = be_u16_at(payload, 3, ImageFormat::Jpeg)?;
                return Ok(Dimensions::new(u32::from(width), u32::from(height)));
            }
        }

        if marker == MARKER_EOI {
            return Ok(Dimensions::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length_classification() {
        assert_eq!(SegmentLength::of(MARKER_SOI), SegmentLength::Standalone);
        assert_eq!(SegmentLength::of(MARKER_EOI), SegmentLength::Standalone);
        assert_eq!(SegmentLength::of(MARKER_DRI), SegmentLength::Fixed(2));
        assert_eq!(SegmentLength::of(MARKER_SOF0), SegmentLength::Prefixed);
        assert_eq!(SegmentLength::of(0xE0), SegmentLength::Prefixed);
    }

    #[test]
    fn test_length_below_two_skips_payload() {
        // APP0 with a bogus length of 1, then EOI
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x01, 0xFF, 0xD9];
        assert_eq!(jpeg_dimensions(&data).unwrap(), Dimensions::default());
    }

    #[test]
    fn test_restart_interval_consumes_two_bytes() {
        let data = [
            0xFF, 0xD8, 0xFF, 0xDD, 0x00, 0x04, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x10, 0x00,
            0x20, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xD9,
        ];
        assert_eq!(jpeg_dimensions(&data).unwrap(), Dimensions::new(32, 16));
    }
}
