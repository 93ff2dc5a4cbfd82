//! little-endian cursor shared by the context and envelope parsers

use crate::error::{Result, SpendContextError};

pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub(crate) fn take(&mut self, len: usize, err: SpendContextError) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(err);
        }
        let bytes: &'a [u8] = self.bytes;
        let out = &bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    pub(crate) fn u8(&mut self, err: SpendContextError) -> Result<u8> {
        Ok(self.take(1, err)?[0])
    }

    pub(crate) fn u32(&mut self, err: SpendContextError) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, err)?);
        Ok(u32::from_le_bytes(buf))
    }

    pub(crate) fn u64(&mut self, err: SpendContextError) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8, err)?);
        Ok(u64::from_le_bytes(buf))
    }

    pub(crate) fn array32(&mut self, err: SpendContextError) -> Result<[u8; 32]> {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(self.take(32, err)?);
        Ok(buf)
    }
}
