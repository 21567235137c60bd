use super::reader::ByteReader;
use crate::error::Result;
use crate::types::{Dimensions, ImageFormat};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR_CHUNK_TYPE: &[u8; 4] = b"IHDR";

/// Signature (8) + IHDR length (4) + IHDR type (4).
pub const IHDR_PAYLOAD_OFFSET: usize = 16;

/// Where the width/height pair is read from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PngBaseline {
    /// Bytes `0..8` of the buffer, whatever they hold. Callers pass the
    /// IHDR payload slice.
    #[default]
    BufferStart,
    /// Skip the signature and IHDR chunk header when the buffer carries
    /// the PNG signature; fall back to the buffer start otherwise.
    IhdrPayload,
}

impl PngBaseline {
    #[inline]
    pub fn offset(&self, data: &[u8]) -> usize {
        match self {
            PngBaseline::IhdrPayload if data.starts_with(&PNG_SIGNATURE) => IHDR_PAYLOAD_OFFSET,
            _ => 0,
        }
    }
}

/// Reads width and height as two big-endian `u32` values from the
/// start of `data`.
///
/// No signature, chunk type or CRC validation is done. Fewer than 8
/// bytes is a bounds violation.
pub fn png_dimensions(data: &[u8]) -> Result<Dimensions> {
    png_dimensions_with(data, PngBaseline::BufferStart)
}

pub fn png_dimensions_with(data: &[u8], baseline: PngBaseline) -> Result<Dimensions> {
    let offset = baseline.offset(data);
    let mut reader = ByteReader::new(data, ImageFormat::Png);
    reader.seek(offset)?;

    let width = reader.read_u32_be()?;
    let height = reader.read_u32_be()?;

    if offset == IHDR_PAYLOAD_OFFSET && &data[12..16] != IHDR_CHUNK_TYPE {
        tracing::debug!(
            chunk = ?&data[12..16],
            "first PNG chunk is not IHDR, dimensions may be wrong"
        );
    }

    Ok(Dimensions::new(width, height))
}
