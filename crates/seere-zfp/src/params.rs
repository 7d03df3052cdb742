//! Coding parameters derived from a compression mode.

use crate::block::{frexp_exponent, BLOCK_SIZE, EBITS};
use seere_core::CompressionMode;

// Defaults leave every constraint slack: at least one bit per block,
// a per-block ceiling no 4-value block can reach, all 32 bit planes,
// and a minimum exponent below any representable value.
const MIN_BITS: u32 = 1;
const MAX_BITS: u32 = 16_658;
const MAX_PREC: u32 = 32;
const MIN_EXP: i32 = -1074;

/// Per-block coding constraints.
///
/// The four lossy knobs of the block coder. Each [`CompressionMode`]
/// pins one of them and leaves the rest at their slack defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingParams {
    /// Minimum bits per block; short blocks are zero-padded up to it.
    pub min_bits: u32,
    /// Maximum bits per block; coding stops when the budget runs out.
    pub max_bits: u32,
    /// Maximum bit planes coded per block.
    pub max_prec: u32,
    /// Smallest block-relative exponent worth coding.
    pub min_exp: i32,
}

impl Default for CodingParams {
    fn default() -> Self {
        Self {
            min_bits: MIN_BITS,
            max_bits: MAX_BITS,
            max_prec: MAX_PREC,
            min_exp: MIN_EXP,
        }
    }
}

impl CodingParams {
    /// Derive coding parameters from a mode.
    ///
    /// - precision(p): cap coded bit planes at `p`
    /// - accuracy(tol): drop bit planes below the tolerance's exponent
    /// - rate(r): fix the block budget to `r` bits per value, floored
    ///   at the 9 bits a block header needs
    ///
    /// Lossless mode bypasses block coding entirely, so it maps to the
    /// slack defaults.
    pub fn from_mode(mode: CompressionMode) -> Self {
        let mut params = Self::default();
        match mode {
            CompressionMode::Lossless => {}
            CompressionMode::Precision(bits) => params.max_prec = bits,
            CompressionMode::Accuracy(tolerance) => {
                params.min_exp = frexp_exponent(tolerance) - 1;
            }
            CompressionMode::Rate(bits_per_value) => {
                let budget = (bits_per_value * BLOCK_SIZE as f64 + 0.5) as u32;
                let budget = budget.max(1 + EBITS);
                params.min_bits = budget;
                params.max_bits = budget;
            }
        }
        params
    }

    /// Whether the budget can bind mid-block, forcing the
    /// rate-constrained coder.
    pub fn is_rate_constrained(&self) -> bool {
        exceeded_maxbits(self.max_bits, self.max_prec)
    }
}

/// True if a worst-case block at `max_prec` planes would not fit in
/// `max_bits`, in which case coding must track the budget bit by bit.
pub(crate) fn exceeded_maxbits(max_bits: u32, max_prec: u32) -> bool {
    (max_prec + 1) * BLOCK_SIZE as u32 - 1 > max_bits
}
