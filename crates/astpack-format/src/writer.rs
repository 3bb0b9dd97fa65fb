//! Append-only byte sink for artifact serialization.

use crate::constants::IntEncoding;
use crate::tag::Tag;
use crate::varint::{MAX_VAR_U32_LEN, encode_var_u32};

/// Error raised by [`ByteWriter`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("writer capacity exceeded: need {needed} bytes, limit is {limit}")]
    CapacityExceeded { needed: usize, limit: usize },
}

/// Forward-only writer over a growable buffer.
///
/// By default the buffer grows without bound. [`ByteWriter::with_limit`] sets a
/// hard cap: a write that would pass it fails with
/// [`WriteError::CapacityExceeded`] and leaves the writer untouched.
#[derive(Debug, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
    limit: Option<usize>,
    int_encoding: IntEncoding,
    tag_bytes_written: u64,
    /// Histogram of varint lengths: `varint_sizes[n - 1]` counts n-byte varints.
    varint_sizes: [u64; MAX_VAR_U32_LEN],
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            limit: None,
            int_encoding: IntEncoding::Varint,
            tag_bytes_written: 0,
            varint_sizes: [0; MAX_VAR_U32_LEN],
        }
    }

    /// Writer with a hard size limit. Preallocates up to 64 KiB of it.
    pub fn with_limit(limit: usize) -> Self {
        let mut writer = Self::new();
        writer.bytes.reserve(limit.min(64 * 1024));
        writer.limit = Some(limit);
        writer
    }

    /// Select how `write_var_u32` encodes. Must not change mid-artifact.
    pub fn with_int_encoding(mut self, encoding: IntEncoding) -> Self {
        self.int_encoding = encoding;
        self
    }

    pub fn int_encoding(&self) -> IntEncoding {
        self.int_encoding
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    /// Advance the cursor by `count` zero bytes (space to patch later).
    pub fn skip(&mut self, count: usize) -> Result<(), WriteError> {
        self.reserve(count)?;
        self.bytes.resize(self.bytes.len() + count, 0);
        Ok(())
    }

    /// Overwrite 4 already-written bytes at `at`.
    ///
    /// # Panics
    /// Panics if `at + 4` is past the current position.
    pub fn patch_u32(&mut self, at: usize, value: u32) {
        self.bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), WriteError> {
        self.reserve(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        self.reserve(bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Write a tag byte and count it.
    pub fn write_tag_byte(&mut self, tag: Tag) -> Result<(), WriteError> {
        self.write_byte(tag.as_u8())?;
        self.tag_bytes_written += 1;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), WriteError> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), WriteError> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), WriteError> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a `varuint32` slot using the writer's integer encoding.
    pub fn write_var_u32(&mut self, value: u32) -> Result<(), WriteError> {
        match self.int_encoding {
            IntEncoding::Varint => self.write_leb_u32(value),
            IntEncoding::Fixed32 => self.write_u32(value),
        }
    }

    /// Write a LEB128 varint regardless of the integer encoding.
    pub fn write_leb_u32(&mut self, value: u32) -> Result<(), WriteError> {
        let mut scratch = Vec::with_capacity(MAX_VAR_U32_LEN);
        encode_var_u32(value, &mut scratch);
        self.write_bytes(&scratch)?;
        self.varint_sizes[scratch.len() - 1] += 1;
        Ok(())
    }

    /// Write a `varuint32` byte length followed by the UTF-8 bytes.
    pub fn write_utf8_str(&mut self, text: &str) -> Result<(), WriteError> {
        let len = self.str_len(text)?;
        self.write_var_u32(len)?;
        self.write_bytes(text.as_bytes())
    }

    /// Like [`write_utf8_str`](Self::write_utf8_str) but the length is always LEB128.
    pub fn write_leb_utf8_str(&mut self, text: &str) -> Result<(), WriteError> {
        let len = self.str_len(text)?;
        self.write_leb_u32(len)?;
        self.write_bytes(text.as_bytes())
    }

    pub fn tag_bytes_written(&self) -> u64 {
        self.tag_bytes_written
    }

    pub fn varint_sizes(&self) -> [u64; MAX_VAR_U32_LEN] {
        self.varint_sizes
    }

    /// Written prefix of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Finish writing and take the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn str_len(&self, text: &str) -> Result<u32, WriteError> {
        u32::try_from(text.len()).map_err(|_| WriteError::CapacityExceeded {
            needed: text.len(),
            limit: u32::MAX as usize,
        })
    }

    fn reserve(&self, additional: usize) -> Result<(), WriteError> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        let needed = self.bytes.len().saturating_add(additional);
        if needed > limit {
            return Err(WriteError::CapacityExceeded { needed, limit });
        }
        Ok(())
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}
