//! Block-floating-point transform primitives.
//!
//! Values are coded in groups of four: the block shares one exponent,
//! each value is quantized to a 32-bit signed integer relative to that
//! exponent, a lifting transform decorrelates the four integers, and
//! the signed results are mapped to negabinary so magnitude ordering
//! survives into the unsigned bit planes.

/// Values per coding block.
pub const BLOCK_SIZE: usize = 4;

/// IEEE 754 single-precision exponent bias.
pub(crate) const EBIAS: i32 = 127;

/// Bits in the encoded common exponent.
pub(crate) const EBITS: u32 = 8;

/// Bit planes in the quantized integer representation.
pub(crate) const INT_PREC: u32 = 32;

// Alternating bit mask used by the negabinary mapping.
const NBMASK: u32 = 0xaaaa_aaaa;

/// Exact power of two as `f64` (`-1022 <= e <= 1023`).
fn pow2(e: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&e));
    f64::from_bits(((1023 + e) as u64) << 52)
}

/// Binary exponent of `x` in `frexp` convention: `x = f * 2^e` with
/// `0.5 <= |f| < 1`. Requires `x` positive and finite.
pub(crate) fn frexp_exponent(x: f64) -> i32 {
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    if biased == 0 {
        // Subnormal: significand alone carries the magnitude.
        let mantissa = bits & ((1u64 << 52) - 1);
        (64 - mantissa.leading_zeros() as i32) - 1074
    } else {
        biased - 1022
    }
}

fn frexp32_exponent(x: f32) -> i32 {
    let bits = x.to_bits();
    let biased = ((bits >> 23) & 0xff) as i32;
    if biased == 0 {
        let mantissa = bits & ((1u32 << 23) - 1);
        (32 - mantissa.leading_zeros() as i32) - 149
    } else {
        biased - 126
    }
}

/// Exponent of a single magnitude, clamped into the normal range so a
/// subnormal maximum does not drag the whole block below what eight
/// exponent bits can carry.
fn scaler_exponent(x: f32) -> i32 {
    if x > 0.0 {
        frexp32_exponent(x).max(1 - EBIAS)
    } else {
        -EBIAS
    }
}

/// Common exponent for a block: the exponent of its largest magnitude.
pub(crate) fn block_exponent(block: &[f32; BLOCK_SIZE]) -> i32 {
    let mut max = 0.0f32;
    for &v in block {
        let f = v.abs();
        if max < f {
            max = f;
        }
    }
    scaler_exponent(max)
}

/// Bit planes worth coding for a block with exponent `emax`: planes
/// entirely below `min_exp` are dropped, capped at `max_prec`.
pub(crate) fn precision(emax: i32, max_prec: u32, min_exp: i32) -> u32 {
    max_prec.min((emax - min_exp + 4).max(0) as u32)
}

/// Quantize a float block to signed integers relative to `emax`.
///
/// The scale factor 2^(30 - emax) puts the largest magnitude just
/// under 2^30. Scaling runs in `f64` so blocks of very small values
/// (emax below roughly -97, where an `f32` scale factor would
/// overflow) still quantize exactly.
pub(crate) fn fwd_cast(block: &[f32; BLOCK_SIZE], emax: i32) -> [i32; BLOCK_SIZE] {
    let scale = pow2(30 - emax);
    let mut out = [0i32; BLOCK_SIZE];
    for (o, &v) in out.iter_mut().zip(block) {
        *o = (v as f64 * scale) as i32;
    }
    out
}

/// Inverse of [`fwd_cast`].
pub(crate) fn bwd_cast(block: &[i32; BLOCK_SIZE], emax: i32) -> [f32; BLOCK_SIZE] {
    let scale = pow2(emax - 30);
    let mut out = [0.0f32; BLOCK_SIZE];
    for (o, &v) in out.iter_mut().zip(block) {
        *o = (v as f64 * scale) as f32;
    }
    out
}

/// Forward decorrelating lift on a 4-vector of quantized integers.
///
/// Non-orthogonal transform, up to a 1/16 scale:
/// ```text
///        ( 4  4  4  4) (x)
/// 1/16 * ( 5  1 -1 -5) (y)
///        (-4  4  4 -4) (z)
///        (-2  6 -6  2) (w)
/// ```
/// Arithmetic wraps to match the two's-complement fixed-point scheme;
/// quantized inputs stay below 2^30 so wrapping never fires for them.
pub(crate) fn fwd_lift(block: &mut [i32; BLOCK_SIZE]) {
    let [mut x, mut y, mut z, mut w] = *block;

    x = x.wrapping_add(w);
    x >>= 1;
    w = w.wrapping_sub(x);
    z = z.wrapping_add(y);
    z >>= 1;
    y = y.wrapping_sub(z);
    x = x.wrapping_add(z);
    x >>= 1;
    z = z.wrapping_sub(x);
    w = w.wrapping_add(y);
    w >>= 1;
    y = y.wrapping_sub(w);
    w = w.wrapping_add(y >> 1);
    y = y.wrapping_sub(w >> 1);

    *block = [x, y, z, w];
}

/// Inverse of [`fwd_lift`].
pub(crate) fn bwd_lift(block: &mut [i32; BLOCK_SIZE]) {
    let [mut x, mut y, mut z, mut w] = *block;

    y = y.wrapping_add(w >> 1);
    w = w.wrapping_sub(y >> 1);
    y = y.wrapping_add(w);
    w = w.wrapping_shl(1);
    w = w.wrapping_sub(y);
    z = z.wrapping_add(x);
    x = x.wrapping_shl(1);
    x = x.wrapping_sub(z);
    y = y.wrapping_add(z);
    z = z.wrapping_shl(1);
    z = z.wrapping_sub(y);
    w = w.wrapping_add(x);
    x = x.wrapping_shl(1);
    x = x.wrapping_sub(w);

    *block = [x, y, z, w];
}

/// Map a two's-complement integer to negabinary, preserving magnitude
/// order in the unsigned bit planes.
pub(crate) fn int_to_uint(x: i32) -> u32 {
    (x as u32).wrapping_add(NBMASK) ^ NBMASK
}

/// Inverse of [`int_to_uint`].
pub(crate) fn uint_to_int(x: u32) -> i32 {
    (x ^ NBMASK).wrapping_sub(NBMASK) as i32
}

/// Fill a block that holds only `n` real values (`n < 4`).
///
/// Padding repeats existing values rather than zero-filling, so the
/// decorrelated tail coefficients stay small and cost few bits.
pub(crate) fn pad_partial(block: &mut [f32; BLOCK_SIZE], n: usize) {
    debug_assert!(n < BLOCK_SIZE);
    if n == 0 {
        block[0] = 0.0;
    }
    if n <= 1 {
        block[1] = block[0];
    }
    if n <= 2 {
        block[2] = block[1];
    }
    block[3] = block[0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frexp_exponent_matches_convention() {
        // 1.0 = 0.5 * 2^1
        assert_eq!(frexp_exponent(1.0), 1);
        assert_eq!(frexp_exponent(0.5), 0);
        assert_eq!(frexp_exponent(1e-3), -9);
        assert_eq!(frexp_exponent(f64::MIN_POSITIVE / 4.0), -1023);

        assert_eq!(frexp32_exponent(1.0), 1);
        assert_eq!(frexp32_exponent(0.75), 0);
        assert_eq!(frexp32_exponent(f32::MIN_POSITIVE / 2.0), -127);
    }

    #[test]
    fn test_block_exponent() {
        assert_eq!(block_exponent(&[0.0; 4]), -EBIAS);
        assert_eq!(block_exponent(&[0.0, -4.0, 1.0, 0.5]), 3);
        // Subnormal maxima clamp to the smallest normal exponent.
        let tiny = f32::MIN_POSITIVE / 8.0;
        assert_eq!(block_exponent(&[tiny, 0.0, 0.0, 0.0]), 1 - EBIAS);
    }

    #[test]
    fn test_precision_bounds() {
        assert_eq!(precision(0, 32, -1074), 32);
        assert_eq!(precision(-10, 32, -8), 2);
        assert_eq!(precision(-20, 32, -8), 0);
        assert_eq!(precision(5, 12, -1074), 12);
    }

    #[test]
    fn test_cast_round_trip_is_near_exact() {
        let block = [1.0f32, -0.25, 0.5, 0.999];
        let emax = block_exponent(&block);
        let iblock = fwd_cast(&block, emax);
        let back = bwd_cast(&iblock, emax);
        for (a, b) in block.iter().zip(back.iter()) {
            assert!((a - b).abs() <= f32::EPSILON * a.abs().max(1.0));
        }
    }

    #[test]
    fn test_cast_handles_tiny_blocks() {
        // emax here is far below the f32 scale-factor range.
        let block = [1.0e-40f32, -2.0e-40, 0.0, 5.0e-41];
        let emax = block_exponent(&block);
        let iblock = fwd_cast(&block, emax);
        assert!(iblock.iter().any(|&v| v != 0));
        let back = bwd_cast(&iblock, emax);
        for (a, b) in block.iter().zip(back.iter()) {
            assert!((a - b).abs() <= a.abs() * 1e-3 + 1e-45);
        }
    }

    #[test]
    fn test_lift_round_trip() {
        let cases = [
            [0i32, 0, 0, 0],
            [1, 2, 3, 4],
            [1 << 29, -(1 << 29), 123_456, -987_654],
            [i32::MAX / 4, i32::MIN / 4, 7, -7],
        ];
        for case in cases {
            let mut block = case;
            fwd_lift(&mut block);
            bwd_lift(&mut block);
            assert_eq!(block, case);
        }
    }

    #[test]
    fn test_negabinary_round_trip() {
        for x in [0i32, 1, -1, 42, -42, i32::MAX, i32::MIN, 1 << 30] {
            assert_eq!(uint_to_int(int_to_uint(x)), x);
        }
        // Small magnitudes map to small codes.
        assert_eq!(int_to_uint(0), 0);
        assert!(int_to_uint(1) < int_to_uint(-2));
    }

    #[test]
    fn test_pad_partial() {
        let mut block = [7.0f32, 8.0, 9.0, 10.0];
        pad_partial(&mut block, 2);
        assert_eq!(block, [7.0, 8.0, 8.0, 7.0]);

        let mut block = [3.0f32, 99.0, 99.0, 99.0];
        pad_partial(&mut block, 1);
        assert_eq!(block, [3.0, 3.0, 3.0, 3.0]);

        let mut block = [99.0f32; 4];
        pad_partial(&mut block, 0);
        assert_eq!(block, [0.0; 4]);
    }
}
