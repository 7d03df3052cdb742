//! Bit-granular stream I/O for the embedded block encoding.
//!
//! Bits are packed least-significant-first into bytes, so a value
//! written with `write_bits(v, n)` reads back with `read_bits(n)`
//! regardless of how the writes around it were sized.

use seere_core::{Error, Result};

fn low_mask(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Append-only bit writer backed by a byte vector.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    // Pending bits not yet flushed to `bytes`, LSB-first.
    buffer: u64,
    buffered: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer that appends after `bytes` (used to continue a frame
    /// whose header was written directly).
    pub fn with_prefix(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            buffer: 0,
            buffered: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer |= (bit as u64) << self.buffered;
        self.buffered += 1;
        self.drain();
    }

    /// Append the low `n` bits of `value`, LSB first (`n <= 64`).
    pub fn write_bits(&mut self, value: u64, n: u32) {
        debug_assert!(n <= 64);
        let mut value = value & low_mask(n);
        let mut n = n;
        while n > 0 {
            let take = n.min(64 - self.buffered);
            self.buffer |= (value & low_mask(take)) << self.buffered;
            self.buffered += take;
            value = value.checked_shr(take).unwrap_or(0);
            n -= take;
            self.drain();
        }
    }

    /// Append `n` zero bits.
    pub fn pad(&mut self, n: u64) {
        let mut n = n;
        while n > 0 {
            let take = n.min(64) as u32;
            self.write_bits(0, take);
            n -= take as u64;
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.buffered as u64
    }

    /// Flush to a byte boundary (zero-padded) and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.buffered > 0 {
            self.bytes.push(self.buffer as u8);
        }
        self.bytes
    }

    fn drain(&mut self) {
        while self.buffered >= 8 {
            self.bytes.push(self.buffer as u8);
            self.buffer >>= 8;
            self.buffered -= 8;
        }
    }
}

/// Bit reader over an encoded byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    buffer: u64,
    buffered: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            buffer: 0,
            buffered: 0,
        }
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.buffered == 0 {
            self.refill()?;
        }
        let bit = self.buffer & 1 != 0;
        self.buffer >>= 1;
        self.buffered -= 1;
        Ok(bit)
    }

    /// Read `n` bits (`n <= 64`), LSB first.
    pub fn read_bits(&mut self, n: u32) -> Result<u64> {
        debug_assert!(n <= 64);
        let mut out = 0u64;
        let mut got = 0u32;
        while got < n {
            if self.buffered == 0 {
                self.refill()?;
            }
            let take = (n - got).min(self.buffered);
            out |= (self.buffer & low_mask(take)) << got;
            self.buffer = self.buffer.checked_shr(take).unwrap_or(0);
            self.buffered -= take;
            got += take;
        }
        Ok(out)
    }

    /// Bits consumed so far.
    pub fn bit_pos(&self) -> u64 {
        self.pos as u64 * 8 - self.buffered as u64
    }

    /// Skip `n` bits.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let mut n = n;
        while n > 0 {
            let take = n.min(64) as u32;
            self.read_bits(take)?;
            n -= take as u64;
        }
        Ok(())
    }

    fn refill(&mut self) -> Result<()> {
        if self.pos >= self.bytes.len() {
            return Err(Error::unexpected_eof(self.pos));
        }
        while self.buffered <= 56 && self.pos < self.bytes.len() {
            self.buffer |= (self.bytes[self.pos] as u64) << self.buffered;
            self.buffered += 8;
            self.pos += 1;
        }
        Ok(())
    }
}
