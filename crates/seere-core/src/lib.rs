//! # Seere Core
//!
//! Core traits and types for the Seere gradient compression harness.
//!
//! Seere is named after the 70th demon of the Ars Goetia, who carries
//! anything over the earth in the blink of an eye - just as this library
//! shrinks gradient tensors so they travel faster between device and host.
//!
//! ## Core pieces
//!
//! - [`CompressionMode`] - closed set of codec configurations
//!   (lossless, precision, accuracy, rate), validated at parse time
//! - [`GradientCodec`] - compress/decompress contract over flat `f32`
//!   gradient buffers
//! - [`StepTimings`] - caller-owned wall-clock accumulators for codec
//!   and transfer intervals
//!
//! ## Example
//!
//! ```ignore
//! use seere_core::{CompressionMode, GradientCodec, StepTimings};
//! use seere_zfp::ZfpCodec;
//!
//! let codec = ZfpCodec::new(CompressionMode::accuracy(1e-3)?);
//! let encoded = codec.compress(&gradients)?;
//! let decoded = codec.decompress(&encoded)?;
//! ```

pub mod error;
pub mod mode;
pub mod stats;
pub mod traits;

pub use error::{Error, Result};
pub use mode::{CompressionMode, ACCURACY_SWEEP, PRECISION_SWEEP, RATE_SWEEP};
pub use stats::StepTimings;
pub use traits::GradientCodec;
