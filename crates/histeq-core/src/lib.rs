//! histeq Core - Basic data structures for contrast enhancement
//!
//! This crate provides the data model shared by the rest of the workspace:
//!
//! - [`PixelBuffer`] - One 8-bit channel of one image
//! - [`Image`] / [`ImageKind`] - Planar grayscale or RGB image
//! - [`Error`] / [`Result`] - Core error type

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{Image, ImageKind, PixelBuffer};

/// Plane indices for RGB images.
pub mod color {
    /// Red plane
    pub const RED: usize = 0;
    /// Green plane
    pub const GREEN: usize = 1;
    /// Blue plane
    pub const BLUE: usize = 2;

    /// Number of distinct 8-bit intensities.
    pub const LEVELS: usize = 256;
}
