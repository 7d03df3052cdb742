//! Codec contract over flat gradient buffers.

use crate::error::Result;
use crate::mode::CompressionMode;

/// Compress and restore flat `f32` gradient buffers.
///
/// A codec is configured once with a [`CompressionMode`] and then
/// applied to one buffer per optimization step. `decompress` must
/// return exactly as many values as were compressed, in the same
/// order; only the values themselves may differ, within the bounds
/// the configured mode promises.
pub trait GradientCodec {
    /// The mode this codec was configured with.
    fn mode(&self) -> CompressionMode;

    /// Encode a flat gradient buffer.
    fn compress(&self, values: &[f32]) -> Result<Vec<u8>>;

    /// Decode an encoded buffer back to gradients.
    fn decompress(&self, encoded: &[u8]) -> Result<Vec<f32>>;

    /// Whether the round trip is bit-exact by construction.
    fn is_lossless(&self) -> bool {
        self.mode().is_lossless()
    }

    /// Check that `values` survives a round trip bit-exactly.
    ///
    /// Compares raw bit patterns, so NaN payloads and signed zeros
    /// count. Only meaningful for lossless configurations; lossy modes
    /// will ordinarily return `false`.
    fn verify_roundtrip(&self, values: &[f32]) -> Result<bool> {
        let decoded = self.decompress(&self.compress(values)?)?;
        if decoded.len() != values.len() {
            return Ok(false);
        }
        Ok(values
            .iter()
            .zip(decoded.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits()))
    }
}
