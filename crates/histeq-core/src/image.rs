//! Image - planar 8-bit image container
//!
//! An [`Image`] is a width, a height and one (grayscale) or three (RGB)
//! [`PixelBuffer`] planes of `width * height` samples each.
//!
//! # Plane layout
//!
//! - Samples are stored row-major, one byte per sample
//! - Color images keep R, G and B in separate planes (not interleaved)
//! - Every plane of an image has the same length
//!
//! Interleaving to and from on-disk layouts is done by the I/O crate.

use crate::error::{Error, Result};
use crate::color;
use std::ops::{Deref, DerefMut};

/// One channel of one image: an ordered run of 8-bit samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer of `len` samples.
    pub fn zeroed(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    /// Create a buffer with every sample set to `value`.
    pub fn filled(len: usize, value: u8) -> Self {
        Self {
            samples: vec![value; len],
        }
    }

    /// Borrow the samples.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the buffer and return the underlying vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.samples
    }
}

impl From<Vec<u8>> for PixelBuffer {
    fn from(samples: Vec<u8>) -> Self {
        Self { samples }
    }
}

impl From<&[u8]> for PixelBuffer {
    fn from(samples: &[u8]) -> Self {
        Self {
            samples: samples.to_vec(),
        }
    }
}

impl FromIterator<u8> for PixelBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Deref for PixelBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.samples
    }
}

impl DerefMut for PixelBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

/// Number of planes an image carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Single-channel grayscale
    Gray,
    /// Three-channel R, G, B
    Rgb,
}

impl ImageKind {
    /// Number of planes for this kind.
    pub fn planes(self) -> usize {
        match self {
            ImageKind::Gray => 1,
            ImageKind::Rgb => 3,
        }
    }
}

/// Planar 8-bit image.
///
/// # Examples
///
/// ```
/// use histeq_core::{Image, ImageKind};
///
/// let img = Image::new(64, 32, ImageKind::Gray).unwrap();
/// assert_eq!(img.pixel_count(), 64 * 32);
/// assert_eq!(img.planes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    kind: ImageKind,
    planes: Vec<PixelBuffer>,
}

impl Image {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, kind: ImageKind) -> Result<Self> {
        let len = Self::plane_len(width, height)?;
        let planes = (0..kind.planes())
            .map(|_| PixelBuffer::zeroed(len))
            .collect();
        Ok(Self {
            width,
            height,
            kind,
            planes,
        })
    }

    /// Wrap an existing plane as a grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneLength`] if the plane does not hold
    /// `width * height` samples.
    pub fn from_gray(width: u32, height: u32, plane: PixelBuffer) -> Result<Self> {
        let len = Self::plane_len(width, height)?;
        check_len(len, &plane)?;
        Ok(Self {
            width,
            height,
            kind: ImageKind::Gray,
            planes: vec![plane],
        })
    }

    /// Build a color image from its red, green and blue planes.
    pub fn from_rgb(
        width: u32,
        height: u32,
        red: PixelBuffer,
        green: PixelBuffer,
        blue: PixelBuffer,
    ) -> Result<Self> {
        let len = Self::plane_len(width, height)?;
        for plane in [&red, &green, &blue] {
            check_len(len, plane)?;
        }
        Ok(Self {
            width,
            height,
            kind: ImageKind::Rgb,
            planes: vec![red, green, blue],
        })
    }

    fn plane_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(width as usize * height as usize)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels per plane (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Grayscale or RGB.
    #[inline]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// All planes, in channel order.
    pub fn planes(&self) -> &[PixelBuffer] {
        &self.planes
    }

    /// Borrow plane `index`.
    pub fn plane(&self, index: usize) -> Result<&PixelBuffer> {
        let len = self.planes.len();
        self.planes
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// The single plane of a grayscale image.
    pub fn gray(&self) -> Result<&PixelBuffer> {
        self.require(ImageKind::Gray)?;
        Ok(&self.planes[0])
    }

    /// The red, green and blue planes of a color image.
    pub fn rgb(&self) -> Result<(&PixelBuffer, &PixelBuffer, &PixelBuffer)> {
        self.require(ImageKind::Rgb)?;
        Ok((
            &self.planes[color::RED],
            &self.planes[color::GREEN],
            &self.planes[color::BLUE],
        ))
    }

    /// Fail with [`Error::UnsupportedKind`] unless the image is `kind`.
    pub fn require(&self, kind: ImageKind) -> Result<()> {
        if self.kind != kind {
            return Err(Error::UnsupportedKind {
                expected: kind,
                actual: self.kind,
            });
        }
        Ok(())
    }
}

fn check_len(expected: usize, plane: &PixelBuffer) -> Result<()> {
    if plane.len() != expected {
        return Err(Error::PlaneLength {
            expected,
            actual: plane.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gray_is_zeroed() {
        let img = Image::new(4, 3, ImageKind::Gray).unwrap();
        assert_eq!(img.kind(), ImageKind::Gray);
        assert_eq!(img.pixel_count(), 12);
        assert!(img.gray().unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(matches!(
            Image::new(0, 10, ImageKind::Rgb),
            Err(Error::InvalidDimension { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_from_gray_checks_length() {
        let plane = PixelBuffer::zeroed(5);
        let err = Image::from_gray(2, 2, plane).unwrap_err();
        assert!(matches!(
            err,
            Error::PlaneLength {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_from_rgb_channel_order() {
        let img = Image::from_rgb(
            2,
            1,
            PixelBuffer::from(vec![1, 2]),
            PixelBuffer::from(vec![3, 4]),
            PixelBuffer::from(vec![5, 6]),
        )
        .unwrap();
        let (r, g, b) = img.rgb().unwrap();
        assert_eq!(r.as_slice(), &[1, 2]);
        assert_eq!(g.as_slice(), &[3, 4]);
        assert_eq!(b.as_slice(), &[5, 6]);
        assert!(img.gray().is_err());
    }

    #[test]
    fn test_plane_out_of_bounds() {
        let img = Image::new(1, 1, ImageKind::Gray).unwrap();
        assert!(img.plane(0).is_ok());
        assert!(matches!(
            img.plane(1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_pixel_buffer_deref() {
        let mut buf = PixelBuffer::filled(3, 7);
        buf[1] = 9;
        assert_eq!(&buf[..], &[7, 9, 7]);
        let collected: PixelBuffer = buf.iter().map(|v| v + 1).collect();
        assert_eq!(collected.into_vec(), vec![8, 10, 8]);
    }
}
