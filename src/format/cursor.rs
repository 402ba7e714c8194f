use super::DecodeError;
use byteorder::{ByteOrder, LittleEndian};

/// Forward-only reader over a borrowed buffer. Every read is bounds checked
/// and advances the offset past the bytes it consumed.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::at(buffer, 0)
    }

    pub fn at(buffer: &'a [u8], offset: usize) -> Self {
        Self { buffer, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn truncated(&self, len: u64) -> DecodeError {
        DecodeError::TruncatedBuffer {
            required: (self.offset as u64).saturating_add(len),
            actual: self.buffer.len() as u64,
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
            .ok_or_else(|| self.truncated(len as u64))?;

        let bytes = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_i16_le_array(&mut self, n: usize) -> Result<Vec<i16>, DecodeError> {
        let len = n
            .checked_mul(2)
            .ok_or_else(|| self.truncated((n as u64).saturating_mul(2)))?;
        let bytes = self.take(len)?;

        let mut values = vec![0; n];
        LittleEndian::read_i16_into(bytes, &mut values);
        Ok(values)
    }

    pub fn read_u8_array(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        Ok(self.take(n)?.to_vec())
    }
}
