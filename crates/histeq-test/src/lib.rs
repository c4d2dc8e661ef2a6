//! histeq-test - Regression test framework for histeq
//!
//! This crate provides a small regression harness plus deterministic
//! synthetic images so tests do not depend on external fixtures.
//!
//! - **Compare**: check computed values, buffers and images
//! - **Display**: additionally write result images under `tests/regout/`
//!
//! # Usage
//!
//! ```ignore
//! use histeq_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("equalize");
//! let img = synth::gradient_gray(64, 64);
//! rp.compare_values(4096.0, img.pixel_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // histeq-test is at crates/histeq-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Deterministic synthetic test images
///
/// Every generator panics if `width` or `height` is 0.
pub mod synth {
    use histeq_core::{Image, PixelBuffer};

    /// Cheap integer hash used to scatter intensities reproducibly.
    fn scramble(i: u32, seed: u32) -> u8 {
        let mut x = i.wrapping_mul(0x9e37_79b1) ^ seed;
        x ^= x >> 15;
        x = x.wrapping_mul(0x85eb_ca6b);
        x ^= x >> 13;
        (x & 0xff) as u8
    }

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Image {
        let plane: PixelBuffer = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Image::from_gray(width, height, plane).expect("synthetic gray image")
    }

    /// Every pixel set to `value`.
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> Image {
        gray(width, height, |_, _| value)
    }

    /// Horizontal ramp from 0 to 255 across the width.
    pub fn gradient_gray(width: u32, height: u32) -> Image {
        gray(width, height, |x, _| ((x * 255) / width.max(2).saturating_sub(1)).min(255) as u8)
    }

    /// Low-contrast content squeezed into `[lo, lo + span)`.
    pub fn low_contrast_gray(width: u32, height: u32, lo: u8, span: u8) -> Image {
        let span = u32::from(span.max(1));
        gray(width, height, |x, y| {
            lo.saturating_add((u32::from(scramble(y * width + x, 7)) % span) as u8)
        })
    }

    /// Pseudo-random intensities seeded by `seed`.
    pub fn noise_gray(width: u32, height: u32, seed: u32) -> Image {
        gray(width, height, |x, y| scramble(y * width + x, seed))
    }

    /// Smoothly varying color image with a hashed texture on top.
    pub fn pattern_rgb(width: u32, height: u32, seed: u32) -> Image {
        let n = width as usize * height as usize;
        let mut r = Vec::with_capacity(n);
        let mut g = Vec::with_capacity(n);
        let mut b = Vec::with_capacity(n);
        for y in 0..height {
            for x in 0..width {
                let t = u32::from(scramble(y * width + x, seed)) / 8;
                r.push(((x * 200) / width.max(1) + t).min(255) as u8);
                g.push(((y * 180) / height.max(1) + 20 + t / 2).min(255) as u8);
                b.push((((x + y) * 90) / (width + height).max(1) + 60 + t).min(255) as u8);
            }
        }
        Image::from_rgb(width, height, r.into(), g.into(), b.into()).expect("synthetic rgb image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use histeq_core::ImageKind;

    #[test]
    fn test_synth_sizes() {
        let img = synth::gradient_gray(17, 5);
        assert_eq!(img.pixel_count(), 85);
        let gray = img.gray().unwrap();
        assert_eq!(gray[0], 0);
        assert_eq!(gray[16], 255);

        let rgb = synth::pattern_rgb(9, 7, 3);
        assert_eq!(rgb.kind(), ImageKind::Rgb);
        assert_eq!(rgb.pixel_count(), 63);
    }

    #[test]
    fn test_synth_deterministic() {
        assert_eq!(synth::noise_gray(13, 11, 5), synth::noise_gray(13, 11, 5));
        assert_ne!(synth::noise_gray(13, 11, 5), synth::noise_gray(13, 11, 6));
    }

    #[test]
    fn test_low_contrast_range() {
        let img = synth::low_contrast_gray(32, 32, 100, 40);
        assert!(img.gray().unwrap().iter().all(|&v| (100..140).contains(&v)));
    }
}
