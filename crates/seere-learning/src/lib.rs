//! # Seere Learning
//!
//! Gradient exchange harness: flattens per-parameter gradients into a
//! contiguous buffer, runs them through a [`GradientCodec`], restores
//! them to their owners, and accounts for where the wall-clock time
//! went.
//!
//! ## Pieces
//!
//! - [`Parameter`], [`flatten`], [`restore`] - the order-preserving
//!   flatten/restore pair over named gradients
//! - [`DeviceLink`] / [`HostLink`] - the transfer seam the harness
//!   times as data movement
//! - [`exchange_gradients`] - one full per-step exchange
//! - [`SweepRunner`] / [`ResultLog`] - runs one training pass per mode
//!   configuration and rewrites the CSV log after each point
//!
//! ## Example
//!
//! ```
//! use seere_core::{CompressionMode, StepTimings};
//! use seere_learning::{exchange_gradients, HostLink, Parameter};
//! use seere_zfp::ZfpCodec;
//!
//! # fn main() -> seere_learning::Result<()> {
//! let mut params = vec![
//!     Parameter::with_grad("fc.weight", vec![2, 2], vec![0.1, -0.2, 0.3, -0.4])?,
//! ];
//! let codec = ZfpCodec::new(CompressionMode::accuracy(1e-3)?);
//! let mut timings = StepTimings::new();
//! exchange_gradients(&mut params, &codec, &HostLink, &mut timings)?;
//! assert_eq!(timings.steps(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod link;
pub mod param;
pub mod step;
pub mod sweep;

pub use error::{HarnessError, Result};
pub use link::{DeviceLink, HostLink};
pub use param::{flatten, grad_numel, restore, with_gradients, Parameter};
pub use step::exchange_gradients;
pub use sweep::{ResultLog, RunRecord, SweepRunner, RESULT_COLUMNS};

// The codec-side types harness callers always need.
pub use seere_core::{CompressionMode, GradientCodec, StepTimings};
