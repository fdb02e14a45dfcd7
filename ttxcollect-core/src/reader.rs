//! Bounded reader over a PES payload slice

use crate::error::DecodeError;

/// Sequential byte reader bounded to a PES payload slice.
///
/// Every accessor checks its bound and reports [`DecodeError::BufferUnderrun`]
/// instead of reading past the end, so truncated or malformed payloads can
/// never cause an out-of-bounds access. A length-bounded sub-reader confines
/// a single data unit's decode to its declared length.
#[derive(Debug, Clone)]
pub struct PesReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> PesReader<'a> {
    /// Create a reader over a payload slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Derive a sub-reader bounded to the next `length` bytes.
    ///
    /// The parent reader is not advanced.
    pub fn sub_reader(&self, length: usize) -> Result<PesReader<'a>, DecodeError> {
        if length > self.bytes_left() {
            return Err(DecodeError::BufferUnderrun {
                requested: length,
                available: self.bytes_left(),
            });
        }
        Ok(PesReader {
            data: &self.data[self.position..self.position + length],
            position: 0,
        })
    }

    /// Number of bytes left to read.
    pub fn bytes_left(&self) -> usize {
        self.data.len() - self.position
    }

    /// Read and consume one byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Return the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(DecodeError::BufferUnderrun {
                requested: 1,
                available: 0,
            })
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        if count > self.bytes_left() {
            return Err(DecodeError::BufferUnderrun {
                requested: count,
                available: self.bytes_left(),
            });
        }
        self.position += count;
        Ok(())
    }
}
