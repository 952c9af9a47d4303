//! Low-level wire format helpers.
//!
//! The findex wire format is deliberately plain: big-endian fixed-width
//! integers and `u32`-length-prefixed byte strings, concatenated in field
//! order. There is no tagging and no padding; every persisted type defines
//! its own fixed field sequence on top of these helpers.

use crate::error::{ProtocolError, ProtocolResult};

/// An append-only encoder for the wire format.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends a big-endian `u32`.
    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Appends a big-endian `u64`.
    pub fn put_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Appends a big-endian `i64`.
    pub fn put_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Appends a `u32` length prefix followed by the raw bytes.
    pub fn put_bytes(&mut self, v: &[u8]) {
        self.put_u32(v.len() as u32);
        self.buf.extend_from_slice(v);
    }

    /// Consumes the writer and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// A cursor-based decoder for the wire format.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of unconsumed bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> ProtocolResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(ProtocolError::UnexpectedEnd {
                needed: n - self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Reads a big-endian `u32`.
    pub fn u32(&mut self) -> ProtocolResult<u32> {
        let raw = self.take(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// Reads a big-endian `u64`.
    pub fn u64(&mut self) -> ProtocolResult<u64> {
        let raw = self.take(8)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(raw);
        Ok(u64::from_be_bytes(b))
    }

    /// Reads a big-endian `i64`.
    pub fn i64(&mut self) -> ProtocolResult<i64> {
        let raw = self.take(8)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(raw);
        Ok(i64::from_be_bytes(b))
    }

    /// Reads a `u32`-length-prefixed byte string.
    pub fn bytes(&mut self) -> ProtocolResult<&'a [u8]> {
        let length = self.u32()? as usize;
        if length > self.remaining() {
            return Err(ProtocolError::LengthOutOfBounds {
                length,
                remaining: self.remaining(),
            });
        }
        self.take(length)
    }

    /// Fails unless the whole input has been consumed.
    pub fn expect_end(&self) -> ProtocolResult<()> {
        if self.remaining() != 0 {
            return Err(ProtocolError::TrailingData {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}
