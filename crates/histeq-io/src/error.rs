//! I/O error types
//!
//! Provides a unified error type for image reading and writing so that
//! callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
///
/// Wraps standard I/O failures, malformed container data and
/// core-library errors.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is a PNM variant this crate does not handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. plane length mismatch)
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
