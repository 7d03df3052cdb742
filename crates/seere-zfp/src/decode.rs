//! Block decoder, mirroring the encoder bit for bit.

use crate::block::{self, BLOCK_SIZE, EBIAS, EBITS, INT_PREC};
use crate::params::{exceeded_maxbits, CodingParams};
use crate::stream::BitReader;
use seere_core::Result;

/// Scatter a decoded 4-bit group word into bit plane `k`.
fn deposit_plane(ublock: &mut [u32; BLOCK_SIZE], mut x: u64, k: u32) {
    let mut i = 0;
    while x != 0 {
        ublock[i] |= ((x & 1) as u32) << k;
        x >>= 1;
        i += 1;
    }
}

/// Decode every bit plane down to `max_prec`; returns bits consumed.
fn decode_full_bitplanes(
    reader: &mut BitReader<'_>,
    ublock: &mut [u32; BLOCK_SIZE],
    max_prec: u32,
) -> Result<u32> {
    let start = reader.bit_pos();
    let kmin = INT_PREC.saturating_sub(max_prec);
    let mut n = 0usize;
    *ublock = [0; BLOCK_SIZE];

    for k in (kmin..INT_PREC).rev() {
        let mut x = reader.read_bits(n as u32)?;

        // Unary run-length decode the remainder of the plane.
        while n < BLOCK_SIZE {
            if !reader.read_bit()? {
                break;
            }
            while n < BLOCK_SIZE - 1 && !reader.read_bit()? {
                n += 1;
            }
            x += 1u64 << n;
            n += 1;
        }

        deposit_plane(ublock, x, k);
    }

    Ok((reader.bit_pos() - start) as u32)
}

/// Decode bit planes under a hard budget of `max_bits`.
///
/// When the budget runs out mid-scan the one-bit being searched for is
/// assumed at the current position, matching the encoder's truncation
/// point as closely as the remaining bits allow.
fn decode_partial_bitplanes(
    reader: &mut BitReader<'_>,
    ublock: &mut [u32; BLOCK_SIZE],
    max_bits: u32,
    max_prec: u32,
) -> Result<u32> {
    let kmin = INT_PREC.saturating_sub(max_prec);
    let mut bits = max_bits;
    let mut n = 0usize;
    let mut k = INT_PREC;
    *ublock = [0; BLOCK_SIZE];

    while bits > 0 && k > kmin {
        k -= 1;

        let m = (n as u32).min(bits);
        bits -= m;
        let mut x = reader.read_bits(m)?;

        loop {
            if bits == 0 || n >= BLOCK_SIZE {
                break;
            }
            bits -= 1;
            if reader.read_bit()? {
                while bits > 0 && n < BLOCK_SIZE - 1 {
                    bits -= 1;
                    if reader.read_bit()? {
                        break;
                    }
                    n += 1;
                }
                x += 1u64 << n;
                n += 1;
            } else {
                break;
            }
        }

        deposit_plane(ublock, x, k);
    }

    Ok(max_bits - bits)
}

/// Decode one quantized block, consuming padding up to `min_bits`.
fn decode_iblock(
    reader: &mut BitReader<'_>,
    min_bits: u32,
    max_bits: u32,
    max_prec: u32,
    ublock: &mut [u32; BLOCK_SIZE],
) -> Result<u32> {
    let decoded = if exceeded_maxbits(max_bits, max_prec) {
        decode_partial_bitplanes(reader, ublock, max_bits, max_prec)?
    } else {
        decode_full_bitplanes(reader, ublock, max_prec)?
    };
    if decoded < min_bits {
        reader.skip((min_bits - decoded) as u64)?;
        Ok(min_bits)
    } else {
        Ok(decoded)
    }
}

/// Decode one float block.
pub(crate) fn decode_block(
    reader: &mut BitReader<'_>,
    params: &CodingParams,
) -> Result<[f32; BLOCK_SIZE]> {
    let mut bits = 1u32;
    if reader.read_bit()? {
        bits += EBITS;
        let emax = reader.read_bits(EBITS)? as i32 - EBIAS;
        let max_prec = block::precision(emax, params.max_prec, params.min_exp);

        let mut ublock = [0u32; BLOCK_SIZE];
        decode_iblock(
            reader,
            params.min_bits.saturating_sub(bits),
            params.max_bits.saturating_sub(bits),
            max_prec,
            &mut ublock,
        )?;

        let mut iblock = [0i32; BLOCK_SIZE];
        for (i, &u) in iblock.iter_mut().zip(&ublock) {
            *i = block::uint_to_int(u);
        }
        block::bwd_lift(&mut iblock);
        Ok(block::bwd_cast(&iblock, emax))
    } else {
        if params.min_bits > bits {
            reader.skip((params.min_bits - bits) as u64)?;
        }
        Ok([0.0; BLOCK_SIZE])
    }
}
