//! Block encoder: embedded bit-plane coding of quantized blocks.

use crate::block::{self, BLOCK_SIZE, EBIAS, EBITS, INT_PREC};
use crate::params::{exceeded_maxbits, CodingParams};
use crate::stream::BitWriter;

/// Transpose bit plane `k` of the block into a 4-bit group word.
fn bit_plane(ublock: &[u32; BLOCK_SIZE], k: u32) -> u64 {
    let mut x = 0u64;
    for (i, &u) in ublock.iter().enumerate() {
        x += (((u >> k) & 1) as u64) << i;
    }
    x
}

/// Encode every bit plane down to `max_prec`, no budget constraint.
///
/// Planes are emitted MSB first. Within a plane, the bits of values
/// already known to be significant go out verbatim; the rest of the
/// plane is group-tested and unary run-length coded, so a value's
/// first one-bit promotes it to the verbatim set for later planes.
fn encode_all_bitplanes(writer: &mut BitWriter, ublock: &[u32; BLOCK_SIZE], max_prec: u32) -> u32 {
    let start = writer.bit_len();
    let kmin = INT_PREC.saturating_sub(max_prec);
    let mut n = 0usize;

    for k in (kmin..INT_PREC).rev() {
        let mut x = bit_plane(ublock, k);

        // First n bits verbatim.
        writer.write_bits(x, n as u32);
        x >>= n;

        // Unary run-length encode the remainder of the plane.
        while n < BLOCK_SIZE {
            let group = x != 0;
            writer.write_bit(group);
            if !group {
                break;
            }
            while n < BLOCK_SIZE - 1 {
                let bit = x & 1 != 0;
                writer.write_bit(bit);
                if bit {
                    break;
                }
                x >>= 1;
                n += 1;
            }
            // The one-bit at the last position is implied once the
            // scan reaches it.
            x >>= 1;
            n += 1;
        }
    }

    (writer.bit_len() - start) as u32
}

/// Encode bit planes under a hard budget of `max_bits`.
///
/// Same plane ordering as [`encode_all_bitplanes`], but every emitted
/// bit is charged against the budget and coding stops mid-plane the
/// moment it runs out.
fn encode_partial_bitplanes(
    writer: &mut BitWriter,
    ublock: &[u32; BLOCK_SIZE],
    max_bits: u32,
    max_prec: u32,
) -> u32 {
    let kmin = INT_PREC.saturating_sub(max_prec);
    let mut bits = max_bits;
    let mut n = 0usize;
    let mut k = INT_PREC;

    while bits > 0 && k > kmin {
        k -= 1;
        let mut x = bit_plane(ublock, k);

        let m = (n as u32).min(bits);
        bits -= m;
        writer.write_bits(x, m);
        x >>= m;

        loop {
            if bits == 0 || n >= BLOCK_SIZE {
                break;
            }
            bits -= 1;
            let group = x != 0;
            writer.write_bit(group);
            if !group {
                break;
            }
            while bits > 0 && n < BLOCK_SIZE - 1 {
                bits -= 1;
                let bit = x & 1 != 0;
                writer.write_bit(bit);
                if bit {
                    break;
                }
                x >>= 1;
                n += 1;
            }
            x >>= 1;
            n += 1;
        }
    }

    max_bits - bits
}

/// Encode one quantized block, padding up to `min_bits` if the
/// embedded coding came in short.
fn encode_iblock(
    writer: &mut BitWriter,
    min_bits: u32,
    max_bits: u32,
    max_prec: u32,
    ublock: &[u32; BLOCK_SIZE],
) -> u32 {
    let encoded = if exceeded_maxbits(max_bits, max_prec) {
        encode_partial_bitplanes(writer, ublock, max_bits, max_prec)
    } else {
        encode_all_bitplanes(writer, ublock, max_prec)
    };
    if encoded < min_bits {
        writer.pad((min_bits - encoded) as u64);
        min_bits
    } else {
        encoded
    }
}

/// Encode one float block and return the bits spent on it.
///
/// Layout per block: a marker bit (1 = coded, 0 = all-zero block),
/// then for coded blocks the 8-bit biased common exponent followed by
/// the embedded integer coding.
pub(crate) fn encode_block(
    writer: &mut BitWriter,
    params: &CodingParams,
    block: &[f32; BLOCK_SIZE],
) -> u32 {
    let mut bits = 1u32;
    let emax = block::block_exponent(block);
    let max_prec = block::precision(emax, params.max_prec, params.min_exp);
    let e = if max_prec > 0 { (emax + EBIAS) as u32 } else { 0 };

    if e != 0 {
        bits += EBITS;
        writer.write_bits((2 * e + 1) as u64, bits);

        let mut iblock = block::fwd_cast(block, emax);
        block::fwd_lift(&mut iblock);
        let mut ublock = [0u32; BLOCK_SIZE];
        for (u, &i) in ublock.iter_mut().zip(&iblock) {
            *u = block::int_to_uint(i);
        }

        bits += encode_iblock(
            writer,
            params.min_bits.saturating_sub(bits),
            params.max_bits.saturating_sub(bits),
            max_prec,
            &ublock,
        );
    } else {
        writer.write_bit(false);
        if params.min_bits > bits {
            writer.pad((params.min_bits - bits) as u64);
            bits = params.min_bits;
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use seere_core::CompressionMode;

    #[test]
    fn test_zero_block_is_one_bit() {
        let params = CodingParams::default();
        let mut writer = BitWriter::new();
        let bits = encode_block(&mut writer, &params, &[0.0; 4]);
        assert_eq!(bits, 1);
        assert_eq!(writer.bit_len(), 1);
    }

    #[test]
    fn test_zero_block_pads_to_min_bits() {
        let params = CodingParams::from_mode(CompressionMode::Rate(8.0));
        let mut writer = BitWriter::new();
        let bits = encode_block(&mut writer, &params, &[0.0; 4]);
        assert_eq!(bits, params.min_bits);
        assert_eq!(writer.bit_len(), params.min_bits as u64);
    }

    #[test]
    fn test_rate_budget_is_exact() {
        let params = CodingParams::from_mode(CompressionMode::Rate(8.0));
        let mut writer = BitWriter::new();
        let bits = encode_block(&mut writer, &params, &[0.9, -0.3, 0.14, -0.72]);
        assert_eq!(bits, 32);
        assert_eq!(writer.bit_len(), 32);
    }

    #[test]
    fn test_coded_block_starts_with_marker_and_exponent() {
        let params = CodingParams::default();
        let mut writer = BitWriter::new();
        let block = [1.5f32, 0.25, -0.75, 1.0];
        encode_block(&mut writer, &params, &block);

        let bytes = writer.finish();
        let mut reader = crate::stream::BitReader::new(&bytes);
        assert!(reader.read_bit().unwrap());
        let e = reader.read_bits(EBITS).unwrap() as i32;
        assert_eq!(e - EBIAS, block::block_exponent(&block));
    }

    #[test]
    fn test_full_coder_skips_dropped_planes() {
        // With max_prec = 4 only the top four planes are coded.
        let ublock = [0x8000_0001u32, 0, 0, 0];
        let mut writer = BitWriter::new();
        let full = encode_all_bitplanes(&mut writer, &ublock, 32);
        let mut writer = BitWriter::new();
        let trimmed = encode_all_bitplanes(&mut writer, &ublock, 4);
        assert!(trimmed < full);
    }

    #[test]
    fn test_partial_coder_respects_budget() {
        let ublock = [u32::MAX, u32::MAX, u32::MAX, u32::MAX];
        for budget in [1u32, 7, 23, 64, 131] {
            let mut writer = BitWriter::new();
            let spent = encode_partial_bitplanes(&mut writer, &ublock, budget, 32);
            assert!(spent <= budget);
            assert_eq!(writer.bit_len(), spent as u64);
        }
    }
}
