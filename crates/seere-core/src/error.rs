//! Error types for gradient codec operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
///
/// Every error here is fatal to the current run: a corrupted gradient
/// step cannot be retried or skipped without desynchronizing the
/// optimizer, so nothing is recoverable by design.
#[derive(Debug, Error)]
pub enum Error {
    /// Encoded representation is corrupted or invalid.
    #[error("corrupted data: {message}")]
    CorruptedData { message: String },

    /// Unexpected end of the encoded representation.
    #[error("unexpected EOF after {bytes_read} bytes")]
    UnexpectedEof { bytes_read: usize },

    /// Unsupported format or version.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Invalid compression configuration, rejected before any step runs.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error from an underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::CorruptedData {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bytes_read: usize) -> Self {
        Error::UnexpectedEof { bytes_read }
    }

    /// Create an unsupported format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::Unsupported(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }

    /// Get error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::CorruptedData { .. } => "corrupted_data",
            Error::UnexpectedEof { .. } => "unexpected_eof",
            Error::Unsupported(_) => "unsupported",
            Error::InvalidConfig(_) => "invalid_config",
            Error::Io(_) => "io_error",
        }
    }
}
