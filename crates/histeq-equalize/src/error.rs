//! Error types for histeq-equalize

use thiserror::Error;

/// Errors that can occur during equalization
#[derive(Debug, Error)]
pub enum EqualizeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),

    /// Color conversion error
    #[error("color error: {0}")]
    Color(#[from] histeq_color::ColorError),

    /// Invalid parameters (worker count, configuration values)
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A partition did not have the planned number of samples
    #[error("partition mismatch for worker {rank}: expected {expected} samples, got {actual}")]
    PartitionMismatch {
        /// Worker that owns the partition
        rank: usize,
        /// Planned sample count
        expected: usize,
        /// Sample count actually received
        actual: usize,
    },

    /// A collective could not complete (peer aborted, channel closed,
    /// worker panicked)
    #[error("coordination failure: {0}")]
    Coordination(String),

    /// The worker thread pool could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type for equalization operations
pub type EqualizeResult<T> = Result<T, EqualizeError>;
