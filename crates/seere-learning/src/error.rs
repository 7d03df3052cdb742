//! Error types for the gradient exchange harness.

use thiserror::Error;

/// Result type alias for harness operations.
pub type Result<T> = core::result::Result<T, HarnessError>;

/// Harness error types.
///
/// A failed exchange leaves the optimizer state inconsistent, so every
/// variant aborts the current run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Restored buffer does not match the gradients it came from.
    #[error("gradient buffer holds {got} values, expected {expected}")]
    SizeMismatch { expected: usize, got: usize },

    /// Underlying codec failure.
    #[error("codec error: {0}")]
    Codec(#[from] seere_core::Error),

    /// I/O error, typically from the result log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Create a size mismatch error.
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        HarnessError::SizeMismatch { expected, got }
    }

    /// Get error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            HarnessError::SizeMismatch { .. } => "size_mismatch",
            HarnessError::Codec(_) => "codec",
            HarnessError::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarnessError::size_mismatch(100, 96);
        assert_eq!(
            err.to_string(),
            "gradient buffer holds 96 values, expected 100"
        );
    }

    #[test]
    fn test_codec_errors_convert() {
        let err: HarnessError = seere_core::Error::corrupted("bad frame").into();
        assert_eq!(err.category(), "codec");
        assert!(err.to_string().contains("bad frame"));
    }
}
