//! Shared-memory backend
//!
//! One process, one fixed-size rayon pool of `W` threads. Each task counts
//! its partition into a private histogram; the coordinating thread sums
//! them after the join. Remapping then writes disjoint sub-slices of one
//! output buffer, so no locks are needed.

use crate::equalizer::Equalizer;
use crate::gather::split_disjoint_mut;
use crate::histogram::Histogram;
use crate::lut::Lut;
use crate::partition::PartitionPlan;
use crate::remap::remap_into;
use crate::{EqualizeError, EqualizeResult, merge};
use histeq_core::PixelBuffer;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Thread-pool equalizer.
pub struct SharedMemory {
    pool: ThreadPool,
    workers: usize,
}

impl SharedMemory {
    /// Build a pool of `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::InvalidParameters`] if `workers` is 0 and
    /// [`EqualizeError::ThreadPool`] if the pool cannot be created.
    pub fn new(workers: usize) -> EqualizeResult<Self> {
        if workers == 0 {
            return Err(EqualizeError::InvalidParameters(
                "worker count must be >= 1".into(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("histeq-shared-{}", idx))
            .build()
            .map_err(|e| EqualizeError::ThreadPool(format!("failed to build thread pool: {}", e)))?;
        Ok(Self { pool, workers })
    }
}

impl Equalizer for SharedMemory {
    fn workers(&self) -> usize {
        self.workers
    }

    fn name(&self) -> &'static str {
        "shared-memory"
    }

    fn equalize(&self, plane: &PixelBuffer) -> EqualizeResult<PixelBuffer> {
        let plan = PartitionPlan::new(plane.len(), self.workers)?;
        log::debug!(
            "shared-memory: {} samples over {} workers",
            plan.total(),
            plan.workers()
        );

        self.pool.install(|| {
            let locals: Vec<Histogram> = plan
                .partitions()
                .par_iter()
                .map(|p| Histogram::from_samples(&plane[p.range()]))
                .collect();

            // Every task has joined; only now is the global histogram known.
            let global = merge::reduce(&locals)?;
            let lut = Lut::build(&global, plan.total() as u64);

            let mut out = PixelBuffer::zeroed(plan.total());
            let slices = split_disjoint_mut(&mut out, &plan)?;
            slices
                .into_par_iter()
                .zip(plan.partitions().par_iter())
                .try_for_each(|(dst, p)| remap_into(p.rank, &plane[p.range()], &lut, dst))?;

            Ok(out)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_two_level() {
        let eq = SharedMemory::new(2).unwrap();
        let out = eq.equalize(&PixelBuffer::from(vec![10, 10, 250, 250])).unwrap();
        assert_eq!(out.as_slice(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_shared_zero_workers() {
        assert!(matches!(
            SharedMemory::new(0),
            Err(EqualizeError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_shared_more_workers_than_samples() {
        let eq = SharedMemory::new(8).unwrap();
        let out = eq.equalize(&PixelBuffer::from(vec![0, 128, 255])).unwrap();
        assert_eq!(out.as_slice(), &[0, 128, 255]);
    }

    #[test]
    fn test_shared_empty_plane() {
        let eq = SharedMemory::new(3).unwrap();
        assert!(eq.equalize(&PixelBuffer::default()).unwrap().is_empty());
    }
}
