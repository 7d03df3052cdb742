//! Self-describing frame format and the [`ZfpCodec`] entry point.
//!
//! A frame is a fixed 22-byte header followed by the payload:
//!
//! ```text
//! magic   [u8; 4]  b"SZFP"
//! version u8       1
//! mode    u8       0 lossless, 1 precision, 2 accuracy, 3 rate
//! param   u64 LE   mode parameter (integer, or f64 bits)
//! count   u64 LE   number of f32 values
//! payload          raw LE f32 bits (lossless) or packed blocks
//! ```
//!
//! The header carries everything needed to decode, so a frame can be
//! decompressed by any codec instance regardless of its own mode.

use crate::block::{pad_partial, BLOCK_SIZE};
use crate::decode::decode_block;
use crate::encode::encode_block;
use crate::params::CodingParams;
use crate::stream::{BitReader, BitWriter};
use seere_core::{CompressionMode, Error, GradientCodec, Result};

const MAGIC: &[u8; 4] = b"SZFP";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 22;

fn mode_tag(mode: CompressionMode) -> (u8, u64) {
    match mode {
        CompressionMode::Lossless => (0, 0),
        CompressionMode::Precision(bits) => (1, bits as u64),
        CompressionMode::Accuracy(tolerance) => (2, tolerance.to_bits()),
        CompressionMode::Rate(rate) => (3, rate.to_bits()),
    }
}

fn mode_from_tag(tag: u8, param: u64) -> Result<CompressionMode> {
    let mode = match tag {
        0 => return Ok(CompressionMode::Lossless),
        1 => {
            if param > u32::MAX as u64 {
                return Err(Error::corrupted(format!("precision parameter {param} out of range")));
            }
            CompressionMode::precision(param as u32)
        }
        2 => CompressionMode::accuracy(f64::from_bits(param)),
        3 => CompressionMode::rate(f64::from_bits(param)),
        other => return Err(Error::corrupted(format!("unknown mode tag {other}"))),
    };
    mode.map_err(|e| Error::corrupted(format!("invalid mode parameter: {e}")))
}

struct Header {
    mode: CompressionMode,
    count: usize,
}

fn write_header(mode: CompressionMode, count: usize) -> Vec<u8> {
    let (tag, param) = mode_tag(mode);
    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(MAGIC);
    header.push(VERSION);
    header.push(tag);
    header.extend_from_slice(&param.to_le_bytes());
    header.extend_from_slice(&(count as u64).to_le_bytes());
    header
}

fn read_header(encoded: &[u8]) -> Result<Header> {
    if encoded.len() < HEADER_LEN {
        return Err(Error::unexpected_eof(encoded.len()));
    }
    if &encoded[..4] != MAGIC {
        return Err(Error::corrupted("bad magic bytes"));
    }
    if encoded[4] != VERSION {
        return Err(Error::unsupported(format!(
            "frame version {} (expected {VERSION})",
            encoded[4]
        )));
    }
    let param = u64::from_le_bytes(encoded[6..14].try_into().unwrap());
    let count = u64::from_le_bytes(encoded[14..22].try_into().unwrap());
    Ok(Header {
        mode: mode_from_tag(encoded[5], param)?,
        count: count as usize,
    })
}

/// Gradient codec over 4-value floating-point blocks.
///
/// Lossless mode stores raw value bits behind the frame header; the
/// lossy modes run the block-floating-point transform and embedded
/// bit-plane coding configured by [`CodingParams`].
#[derive(Debug, Clone)]
pub struct ZfpCodec {
    mode: CompressionMode,
    params: CodingParams,
}

impl ZfpCodec {
    pub fn new(mode: CompressionMode) -> Self {
        Self {
            mode,
            params: CodingParams::from_mode(mode),
        }
    }

    /// The block coding parameters in effect.
    pub fn params(&self) -> &CodingParams {
        &self.params
    }

    fn compress_lossless(&self, values: &[f32], mut out: Vec<u8>) -> Vec<u8> {
        out.reserve(values.len() * 4);
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    fn compress_blocks(&self, values: &[f32], header: Vec<u8>) -> Vec<u8> {
        let mut writer = BitWriter::with_prefix(header);
        for chunk in values.chunks(BLOCK_SIZE) {
            let mut block = [0.0f32; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            if chunk.len() < BLOCK_SIZE {
                pad_partial(&mut block, chunk.len());
            }
            encode_block(&mut writer, &self.params, &block);
        }
        writer.finish()
    }
}

impl GradientCodec for ZfpCodec {
    fn mode(&self) -> CompressionMode {
        self.mode
    }

    fn compress(&self, values: &[f32]) -> Result<Vec<u8>> {
        let header = write_header(self.mode, values.len());
        Ok(if self.mode.is_lossless() {
            self.compress_lossless(values, header)
        } else {
            self.compress_blocks(values, header)
        })
    }

    fn decompress(&self, encoded: &[u8]) -> Result<Vec<f32>> {
        let header = read_header(encoded)?;
        let payload = &encoded[HEADER_LEN..];

        if header.mode.is_lossless() {
            let expected = header
                .count
                .checked_mul(4)
                .ok_or_else(|| Error::corrupted("value count overflows"))?;
            if payload.len() != expected {
                return Err(Error::corrupted(format!(
                    "lossless payload holds {} bytes, expected {expected}",
                    payload.len(),
                )));
            }
            return Ok(payload
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect());
        }

        // Every 4-value block costs at least one bit, so a count the
        // payload cannot possibly hold means a mangled header.
        if header.count.div_ceil(4) > payload.len().saturating_mul(8) {
            return Err(Error::corrupted(format!(
                "value count {} exceeds payload capacity",
                header.count
            )));
        }

        let params = CodingParams::from_mode(header.mode);
        let mut reader = BitReader::new(payload);
        let mut values = Vec::with_capacity(header.count);
        let mut remaining = header.count;
        while remaining > 0 {
            let block = decode_block(&mut reader, &params)?;
            let take = remaining.min(BLOCK_SIZE);
            values.extend_from_slice(&block[..take]);
            remaining -= take;
        }
        Ok(values)
    }
}
