//! histeq-color - Color space conversion for contrast enhancement
//!
//! Equalizing R, G and B independently shifts hues, so color images are
//! converted to a model with a single intensity-like channel, that channel
//! is equalized, and the result is converted back:
//!
//! - HSL: the lightness plane carries intensity
//! - YUV: the luma plane carries intensity
//!
//! # Example
//!
//! ```
//! use histeq_color::{HslImage, rgb_to_hsl};
//! use histeq_core::{Image, PixelBuffer};
//!
//! let hsl = rgb_to_hsl(255, 0, 0);
//! assert_eq!(hsl.l, 127);
//!
//! let img = Image::from_rgb(
//!     1,
//!     1,
//!     PixelBuffer::from(vec![255]),
//!     PixelBuffer::from(vec![255]),
//!     PixelBuffer::from(vec![255]),
//! )
//! .unwrap();
//! let back = HslImage::from_rgb(&img).unwrap().to_rgb().unwrap();
//! assert_eq!(back, img);
//! ```

pub mod colorspace;
mod error;

pub use colorspace::{
    Hsl, HslImage, Yuv, YuvImage, hsl_to_rgb, rgb_to_hsl, rgb_to_yuv, same_shape, yuv_to_rgb,
};
pub use error::{ColorError, ColorResult};
