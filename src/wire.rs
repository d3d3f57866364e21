//! Bounds-checked big-endian primitive reader.
//!
//! Every read fails with [`Error::Truncated`] rather than panicking; there
//! is no trust in declared lengths ahead of the bytes actually present.

use bytes::Buf;

use crate::error::{Error, Result};

/// A cursor over an immutable byte buffer.
pub struct Cursor<'a> {
    buf: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn require(&self, n: usize) -> Result<()> {
        if self.buf.len() < n {
            Err(Error::Truncated {
                needed: n,
                available: self.buf.len(),
            })
        } else {
            Ok(())
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        let v = self.buf[0];
        self.buf = &self.buf[1..];
        Ok(v)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.require(2)?;
        let mut tmp = &self.buf[..2];
        let v = tmp.get_u16();
        self.buf = &self.buf[2..];
        Ok(v)
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.require(4)?;
        let mut tmp = &self.buf[..4];
        let v = tmp.get_u32();
        self.buf = &self.buf[4..];
        Ok(v)
    }

    pub fn read_i32_be(&mut self) -> Result<i32> {
        self.require(4)?;
        let mut tmp = &self.buf[..4];
        let v = tmp.get_i32();
        self.buf = &self.buf[4..];
        Ok(v)
    }

    pub fn read_f32_be(&mut self) -> Result<f32> {
        self.require(4)?;
        let mut tmp = &self.buf[..4];
        let v = tmp.get_f32();
        self.buf = &self.buf[4..];
        Ok(v)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.require(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Reads `n` bytes and interprets them as ASCII (non-UTF8-validating,
    /// used for fixed tag fields such as the "MXTP" magic and message type
    /// digits).
    pub fn read_ascii(&mut self, n: usize) -> Result<&'a [u8]> {
        self.read_bytes(n)
    }

    /// Reads an i32 big-endian length prefix followed by that many bytes,
    /// interpreted as UTF-8. The string is NOT null-terminated on the wire.
    pub fn read_lenprefixed_string(&mut self) -> Result<String> {
        let len = self.read_i32_be()?;
        if len < 0 {
            return Err(Error::Truncated {
                needed: 0,
                available: self.buf.len(),
            });
        }
        let bytes = self.read_bytes(len as usize)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
