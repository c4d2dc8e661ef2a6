//! Partition planning
//!
//! Splits `N` samples across `W` workers. Every worker but the last gets
//! `N / W` samples; the last also takes the `N mod W` remainder. Offsets
//! are `i * (N / W)`, so the partitions are disjoint and cover `[0, N)`
//! exactly once.
//!
//! When `N < W` the leading workers get empty partitions and the last
//! worker gets all `N` samples.

use crate::{EqualizeError, EqualizeResult};
use std::ops::Range;

/// The contiguous run of samples owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Worker index in `[0, W)`
    pub rank: usize,
    /// First sample index
    pub offset: usize,
    /// Number of samples
    pub count: usize,
}

impl Partition {
    /// Sample index range `[offset, offset + count)`.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.count
    }

    /// True if the partition owns no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Partition table for one run: one [`Partition`] per worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    total: usize,
    partitions: Vec<Partition>,
}

impl PartitionPlan {
    /// Plan `total` samples over `workers` workers.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::InvalidParameters`] if `workers` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use histeq_equalize::PartitionPlan;
    ///
    /// let plan = PartitionPlan::new(10, 3).unwrap();
    /// let counts: Vec<usize> = plan.partitions().iter().map(|p| p.count).collect();
    /// assert_eq!(counts, vec![3, 3, 4]);
    /// ```
    pub fn new(total: usize, workers: usize) -> EqualizeResult<Self> {
        if workers == 0 {
            return Err(EqualizeError::InvalidParameters(
                "worker count must be >= 1".into(),
            ));
        }

        let base = total / workers;
        let remainder = total % workers;
        let partitions = (0..workers)
            .map(|rank| Partition {
                rank,
                offset: rank * base,
                count: if rank == workers - 1 {
                    base + remainder
                } else {
                    base
                },
            })
            .collect();

        Ok(Self { total, partitions })
    }

    /// Total number of samples covered.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of workers.
    #[inline]
    pub fn workers(&self) -> usize {
        self.partitions.len()
    }

    /// All partitions, in rank order.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Partition owned by `rank`.
    pub fn partition(&self, rank: usize) -> EqualizeResult<Partition> {
        self.partitions.get(rank).copied().ok_or_else(|| {
            EqualizeError::InvalidParameters(format!(
                "rank {} out of range for {} workers",
                rank,
                self.partitions.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_cover(plan: &PartitionPlan) {
        let mut next = 0;
        for p in plan.partitions() {
            assert_eq!(p.offset, next);
            next += p.count;
        }
        assert_eq!(next, plan.total());
    }

    #[test]
    fn test_plan_even_split() {
        let plan = PartitionPlan::new(12, 4).unwrap();
        assert!(plan.partitions().iter().all(|p| p.count == 3));
        check_cover(&plan);
    }

    #[test]
    fn test_plan_remainder_on_last() {
        let plan = PartitionPlan::new(11, 4).unwrap();
        let counts: Vec<usize> = plan.partitions().iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![2, 2, 2, 5]);
        assert_eq!(plan.partition(3).unwrap().offset, 6);
        check_cover(&plan);
    }

    #[test]
    fn test_plan_fewer_samples_than_workers() {
        let plan = PartitionPlan::new(3, 5).unwrap();
        assert!(plan.partitions()[..4].iter().all(Partition::is_empty));
        assert_eq!(plan.partition(4).unwrap().range(), 0..3);
        check_cover(&plan);
    }

    #[test]
    fn test_plan_zero_workers() {
        assert!(matches!(
            PartitionPlan::new(10, 0),
            Err(EqualizeError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_plan_empty_input() {
        let plan = PartitionPlan::new(0, 3).unwrap();
        assert_eq!(plan.workers(), 3);
        assert!(plan.partitions().iter().all(Partition::is_empty));
    }

    #[test]
    fn test_partition_rank_out_of_range() {
        let plan = PartitionPlan::new(10, 2).unwrap();
        assert!(plan.partition(2).is_err());
    }
}
