//! Error types for histeq-core
//!
//! Provides a unified error type for image construction and plane access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// histeq-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// A plane does not hold `width * height` samples
    #[error("plane length mismatch: expected {expected} samples, got {actual}")]
    PlaneLength { expected: usize, actual: usize },

    /// The image has the wrong number of channels for this operation
    #[error("unsupported image kind: expected {expected:?}, got {actual:?}")]
    UnsupportedKind {
        expected: crate::ImageKind,
        actual: crate::ImageKind,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
