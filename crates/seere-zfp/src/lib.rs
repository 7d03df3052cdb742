//! # Seere ZFP
//!
//! Floating-point gradient codec built on a block-floating-point
//! transform with embedded bit-plane coding.
//!
//! Values are coded in blocks of four: each block shares a common
//! exponent, is quantized to 32-bit integers, decorrelated by a
//! lifting transform, mapped to negabinary, and coded one bit plane at
//! a time from most to least significant. Truncating the coding early
//! is what the lossy modes do, each along a different axis:
//!
//! - [`CompressionMode::Precision`] caps coded bit planes
//! - [`CompressionMode::Accuracy`] drops planes below an error
//!   tolerance
//! - [`CompressionMode::Rate`] fixes the bits spent per block
//! - [`CompressionMode::Lossless`] bypasses the transform and stores
//!   raw value bits
//!
//! ## Example
//!
//! ```
//! use seere_core::{CompressionMode, GradientCodec};
//! use seere_zfp::ZfpCodec;
//!
//! # fn main() -> seere_core::Result<()> {
//! let codec = ZfpCodec::new(CompressionMode::accuracy(1e-3)?);
//! let gradients = vec![0.02f32, -0.173, 0.0041, 0.96, -0.33];
//! let encoded = codec.compress(&gradients)?;
//! let decoded = codec.decompress(&encoded)?;
//! assert_eq!(decoded.len(), gradients.len());
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod codec;
pub mod decode;
pub mod encode;
pub mod params;
pub mod stream;

pub use block::BLOCK_SIZE;
pub use codec::ZfpCodec;
pub use params::CodingParams;

// Re-exported so codec callers need only one crate in scope.
pub use seere_core::{CompressionMode, GradientCodec};
