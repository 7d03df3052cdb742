//! Compression mode configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tolerance sweep for accuracy mode, coarsest to near-lossless.
pub const ACCURACY_SWEEP: [f64; 4] = [1e-1, 1e-3, 1e-6, 1e-9];

/// Default bits-per-value sweep for rate mode.
pub const RATE_SWEEP: [f64; 4] = [4.0, 8.0, 16.0, 32.0];

/// Default bit-plane sweep for precision mode.
pub const PRECISION_SWEEP: [u32; 4] = [4, 8, 16, 32];

/// Compression strategy selected once per experiment run.
///
/// The variants form a closed set checked at configuration-parse time;
/// an unknown mode name is a fatal error before any step executes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// Identity round trip; control group for pure data-movement cost.
    Lossless,

    /// Bound the number of retained bit planes per value.
    /// Higher values keep more precision and encode larger.
    Precision(u32),

    /// Bound the absolute per-value reconstruction error by a tolerance.
    /// Smaller tolerances encode larger.
    Accuracy(f64),

    /// Fix the average encoded bits per value, trading accuracy for a
    /// size-predictable encoding.
    Rate(f64),
}

impl CompressionMode {
    /// Precision mode with `bits` retained bit planes (1..=32).
    pub fn precision(bits: u32) -> Result<Self> {
        if !(1..=32).contains(&bits) {
            return Err(Error::invalid_config(format!(
                "precision must be in 1..=32 bit planes, got {bits}"
            )));
        }
        Ok(CompressionMode::Precision(bits))
    }

    /// Accuracy mode with an absolute error tolerance (> 0, finite).
    pub fn accuracy(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(Error::invalid_config(format!(
                "tolerance must be positive and finite, got {tolerance}"
            )));
        }
        Ok(CompressionMode::Accuracy(tolerance))
    }

    /// Rate mode with an average bits-per-value budget (> 0, finite).
    pub fn rate(bits_per_value: f64) -> Result<Self> {
        if !bits_per_value.is_finite() || bits_per_value <= 0.0 {
            return Err(Error::invalid_config(format!(
                "rate must be positive and finite, got {bits_per_value}"
            )));
        }
        Ok(CompressionMode::Rate(bits_per_value))
    }

    /// Parse a mode from its name and scalar configuration variable.
    ///
    /// The variable is ignored for `lossless`. Unknown names are
    /// rejected here, at run start.
    pub fn parse(name: &str, variable: f64) -> Result<Self> {
        match name {
            "lossless" => Ok(CompressionMode::Lossless),
            "precision" => {
                if variable.fract() != 0.0 {
                    return Err(Error::invalid_config(format!(
                        "precision must be a whole number of bit planes, got {variable}"
                    )));
                }
                Self::precision(variable as u32)
            }
            "accuracy" => Self::accuracy(variable),
            "rate" => Self::rate(variable),
            other => Err(Error::invalid_config(format!(
                "unknown compression mode `{other}`"
            ))),
        }
    }

    /// Mode name as used in the result log.
    pub fn name(self) -> &'static str {
        match self {
            CompressionMode::Lossless => "lossless",
            CompressionMode::Precision(_) => "precision",
            CompressionMode::Accuracy(_) => "accuracy",
            CompressionMode::Rate(_) => "rate",
        }
    }

    /// Scalar configuration variable as logged (0 for lossless).
    pub fn variable(self) -> f64 {
        match self {
            CompressionMode::Lossless => 0.0,
            CompressionMode::Precision(bits) => bits as f64,
            CompressionMode::Accuracy(tolerance) => tolerance,
            CompressionMode::Rate(rate) => rate,
        }
    }

    /// Whether the round trip is bit-exact by construction.
    pub fn is_lossless(self) -> bool {
        matches!(self, CompressionMode::Lossless)
    }

    /// Default sweep points for a mode name (lossless sweeps a single
    /// point, matching its role as the control group).
    pub fn sweep(name: &str) -> Result<Vec<Self>> {
        match name {
            "lossless" => Ok(vec![CompressionMode::Lossless]),
            "precision" => PRECISION_SWEEP.iter().map(|&p| Self::precision(p)).collect(),
            "accuracy" => ACCURACY_SWEEP.iter().map(|&t| Self::accuracy(t)).collect(),
            "rate" => RATE_SWEEP.iter().map(|&r| Self::rate(r)).collect(),
            other => Err(Error::invalid_config(format!(
                "unknown compression mode `{other}`"
            ))),
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionMode::Lossless => write!(f, "lossless"),
            CompressionMode::Precision(bits) => write!(f, "precision={bits}"),
            CompressionMode::Accuracy(tolerance) => write!(f, "accuracy={tolerance}"),
            CompressionMode::Rate(rate) => write!(f, "rate={rate}"),
        }
    }
}
