//! histeq-equalize - Parallel histogram equalization
//!
//! This crate provides the equalization engine and its two execution
//! models:
//!
//! - [`PartitionPlan`] - Split `N` samples across `W` workers
//! - [`Histogram`] / [`merge::reduce`] - Local counts and their global sum
//! - [`Lut`] - CDF-based tone mapping table
//! - [`remap`] / [`gather`] - Apply the table and reassemble partitions
//! - [`SharedMemory`] - rayon thread-pool backend
//! - [`MessagePassing`] - rank-per-thread backend over channels
//! - [`ExecConfig`] - Worker count and model resolved from the environment
//! - [`contrast`] - Gray, HSL and YUV enhancement entry points
//!
//! # Example
//!
//! ```
//! use histeq_core::PixelBuffer;
//! use histeq_equalize::{Equalizer, SharedMemory};
//!
//! let eq = SharedMemory::new(2).unwrap();
//! let out = eq.equalize(&PixelBuffer::from(vec![10, 10, 250, 250])).unwrap();
//! assert_eq!(out.as_slice(), &[0, 0, 255, 255]);
//! ```

pub mod config;
pub mod contrast;
pub mod equalizer;
mod error;
pub mod gather;
pub mod histogram;
pub mod lut;
pub mod merge;
pub mod message;
pub mod partition;
pub mod remap;
pub mod shared;

pub use config::{ExecConfig, ExecModel};
pub use contrast::{
    ColorModel, contrast_enhancement, contrast_enhancement_gray, contrast_enhancement_hsl,
    contrast_enhancement_yuv,
};
pub use equalizer::Equalizer;
pub use error::{EqualizeError, EqualizeResult};
pub use gather::assemble;
pub use histogram::Histogram;
pub use lut::Lut;
pub use message::MessagePassing;
pub use partition::{Partition, PartitionPlan};
pub use shared::SharedMemory;
