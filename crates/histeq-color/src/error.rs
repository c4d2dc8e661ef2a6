//! Error types for histeq-color

use thiserror::Error;

/// Errors that can occur during color space conversion
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),

    /// Component planes of a converted image disagree in length
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
