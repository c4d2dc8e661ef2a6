//! histeq - Contrast enhancement by parallel histogram equalization
//!
//! # Overview
//!
//! Grayscale images are equalized directly; color images are equalized
//! on the lightness channel of HSL or the luma channel of YUV. The
//! equalization itself runs across `W` workers under one of two models:
//!
//! - Shared memory: one rayon thread pool
//! - Message passing: isolated ranks that exchange histograms and
//!   partitions over channels
//!
//! Both produce the same output for any worker count.
//!
//! # Example
//!
//! ```
//! use histeq::{ExecConfig, ExecModel, Image, PixelBuffer, contrast_enhancement_gray};
//!
//! let img = Image::from_gray(2, 2, PixelBuffer::from(vec![10, 10, 250, 250])).unwrap();
//! let eq = ExecConfig::new(2, ExecModel::MessagePassing).unwrap().build().unwrap();
//! let out = contrast_enhancement_gray(&img, eq.as_ref()).unwrap();
//! assert_eq!(out.gray().unwrap().as_slice(), &[0, 0, 255, 255]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use histeq_core::*;

// Re-export the engine's entry points
pub use histeq_equalize::{
    ColorModel, Equalizer, ExecConfig, ExecModel, contrast_enhancement,
    contrast_enhancement_gray, contrast_enhancement_hsl, contrast_enhancement_yuv,
};

pub mod driver;

// Re-export domain crates as modules to avoid name conflicts
pub use histeq_color as colorspace;
pub use histeq_equalize as equalize;
pub use histeq_io as io;
