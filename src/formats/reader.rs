use crate::error::{ImageError, Result};
use crate::types::ImageFormat;

/// Forward-only cursor over an encoded buffer.
///
/// Every read is bounds-checked; running off the end yields
/// [`ImageError::BoundsViolation`] tagged with the format being parsed.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    format: ImageFormat,
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8], format: ImageFormat) -> Self {
        Self {
            data,
            pos: 0,
            format,
        }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(self.violation(pos - self.pos));
        }
        self.pos = pos;
        Ok(())
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.violation(len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn violation(&self, requested: usize) -> ImageError {
        ImageError::BoundsViolation {
            format: self.format,
            offset: self.pos,
            requested,
            available: self.data.len(),
        }
    }
}

/// Reads a big-endian `u16` at `offset` within an already-extracted segment.
pub(crate) fn be_u16_at(segment: &[u8], offset: usize, format: ImageFormat) -> Result<u16> {
    match segment.get(offset..offset + 2) {
        Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
        None => Err(ImageError::BoundsViolation {
            format,
            offset,
            requested: 2,
            available: segment.len(),
        }),
    }
}
