//! Intensity histogram
//!
//! A 256-bin count of 8-bit samples. Local histograms are built per
//! partition and summed into the global histogram.

use histeq_core::color::LEVELS;
use std::ops::Index;

/// 256-bin intensity histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; LEVELS] }
    }
}

impl Histogram {
    /// Count every sample in `samples`.
    ///
    /// Empty input gives the all-zero histogram.
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut hist = Self::default();
        for &v in samples {
            hist.bins[v as usize] += 1;
        }
        hist
    }

    /// Add `other` into `self`, bin by bin.
    pub fn accumulate(&mut self, other: &Histogram) {
        for (a, b) in self.bins.iter_mut().zip(other.bins.iter()) {
            *a += b;
        }
    }

    /// Number of samples counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Value of the first nonzero bin scanning upward, or 0 if empty.
    pub fn first_nonzero(&self) -> u64 {
        self.bins.iter().copied().find(|&c| c != 0).unwrap_or(0)
    }

    /// Count for intensity `value`.
    #[inline]
    pub fn get(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }
}

impl Index<u8> for Histogram {
    type Output = u64;

    fn index(&self, value: u8) -> &u64 {
        &self.bins[value as usize]
    }
}
