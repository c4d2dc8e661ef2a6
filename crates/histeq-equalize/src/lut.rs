//! Equalization lookup table
//!
//! Maps each input intensity through the normalized cumulative
//! distribution of the global histogram:
//!
//! ```text
//! lut[v] = round((cdf(v) - cdf_min) * 255 / (N - cdf_min))
//! ```
//!
//! where `cdf_min` is the count in the first nonzero bin. Rounding is
//! half-up in exact integer arithmetic, so every worker that builds the
//! table from the same histogram gets the same entries.

use crate::histogram::Histogram;
use histeq_core::color::LEVELS;

/// Largest output intensity.
pub const MAX_VALUE: u32 = 255;

/// Entry used for every intensity when the distribution is degenerate
/// (`N - cdf_min <= 0`, i.e. a uniform or empty image).
pub const DEGENERATE_VALUE: u32 = 0;

/// 256-entry tone mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    table: [u32; LEVELS],
}

impl Lut {
    /// Build the table from a global histogram and pixel count.
    ///
    /// # Examples
    ///
    /// ```
    /// use histeq_equalize::{Histogram, Lut};
    ///
    /// let hist = Histogram::from_samples(&[10, 10, 250, 250]);
    /// let lut = Lut::build(&hist, 4);
    /// assert_eq!(lut.apply(10), 0);
    /// assert_eq!(lut.apply(250), 255);
    /// ```
    pub fn build(hist: &Histogram, pixel_count: u64) -> Self {
        let cdf_min = hist.first_nonzero() as i64;
        let d = pixel_count as i64 - cdf_min;

        if d <= 0 {
            log::debug!(
                "degenerate distribution (N = {}, cdf_min = {}), using guard value",
                pixel_count,
                cdf_min
            );
            return Self {
                table: [DEGENERATE_VALUE; LEVELS],
            };
        }

        let mut table = [0u32; LEVELS];
        let mut cdf: i64 = 0;
        for (v, entry) in table.iter_mut().enumerate() {
            cdf += hist.get(v as u8) as i64;
            let num = cdf - cdf_min;
            *entry = if num <= 0 {
                0
            } else {
                ((2 * num * MAX_VALUE as i64 + d) / (2 * d)) as u32
            };
        }
        Self { table }
    }

    /// Build the table using the histogram's own total as `N`.
    pub fn from_histogram(hist: &Histogram) -> Self {
        Self::build(hist, hist.total())
    }

    /// Raw table entry for `value`, before clamping.
    #[inline]
    pub fn entry(&self, value: u8) -> u32 {
        self.table[value as usize]
    }

    /// Mapped intensity for `value`, clamped to 255.
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.table[value as usize].min(MAX_VALUE) as u8
    }

    /// True if entries never decrease with intensity.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }
}
