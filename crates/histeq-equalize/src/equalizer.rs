//! Execution backend abstraction

use crate::EqualizeResult;
use histeq_core::PixelBuffer;

/// A parallel histogram-equalization backend.
///
/// Implementations split the plane across [`workers`](Equalizer::workers)
/// workers, merge their local histograms, build one LUT and remap every
/// partition through it. The output is independent of the worker count.
pub trait Equalizer: Send + Sync {
    /// Number of workers the plane is split across.
    fn workers(&self) -> usize;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Equalize one 8-bit plane, returning a plane of the same length.
    fn equalize(&self, plane: &PixelBuffer) -> EqualizeResult<PixelBuffer>;
}
