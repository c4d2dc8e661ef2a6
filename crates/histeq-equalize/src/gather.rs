//! Result gathering
//!
//! Reassembles remapped partitions into one plane. Message passing sends
//! each rank's output to the root, which calls [`assemble`]; shared memory
//! hands each task a disjoint sub-slice of the output from
//! [`split_disjoint_mut`] and lets it write in place.

use crate::partition::PartitionPlan;
use crate::{EqualizeError, EqualizeResult};
use histeq_core::PixelBuffer;

/// Check that `parts` matches `plan` rank for rank.
///
/// A missing or extra part is reported against the first rank that has
/// no counterpart.
pub fn check_parts<T: AsRef<[u8]>>(plan: &PartitionPlan, parts: &[T]) -> EqualizeResult<()> {
    if parts.len() != plan.workers() {
        let rank = parts.len().min(plan.workers());
        return Err(EqualizeError::PartitionMismatch {
            rank,
            expected: plan.workers(),
            actual: parts.len(),
        });
    }
    for (p, part) in plan.partitions().iter().zip(parts) {
        let actual = part.as_ref().len();
        if actual != p.count {
            return Err(EqualizeError::PartitionMismatch {
                rank: p.rank,
                expected: p.count,
                actual,
            });
        }
    }
    Ok(())
}

/// Place each part at its planned offset.
///
/// # Errors
///
/// Returns [`EqualizeError::PartitionMismatch`] before writing anything if
/// a part's length differs from its planned count, or if the number of
/// parts differs from the number of workers.
pub fn assemble(plan: &PartitionPlan, parts: Vec<Vec<u8>>) -> EqualizeResult<PixelBuffer> {
    check_parts(plan, &parts)?;

    let mut out = PixelBuffer::zeroed(plan.total());
    for (p, part) in plan.partitions().iter().zip(parts) {
        out[p.range()].copy_from_slice(&part);
    }
    Ok(out)
}

/// Split `buf` into one mutable slice per partition, in rank order.
///
/// # Errors
///
/// Returns [`EqualizeError::PartitionMismatch`] if `buf` is not exactly
/// `plan.total()` samples long.
pub fn split_disjoint_mut<'a>(
    buf: &'a mut [u8],
    plan: &PartitionPlan,
) -> EqualizeResult<Vec<&'a mut [u8]>> {
    if buf.len() != plan.total() {
        return Err(EqualizeError::PartitionMismatch {
            rank: 0,
            expected: plan.total(),
            actual: buf.len(),
        });
    }

    let mut slices = Vec::with_capacity(plan.workers());
    let mut rest = buf;
    for p in plan.partitions() {
        let (head, tail) = rest.split_at_mut(p.count);
        slices.push(head);
        rest = tail;
    }
    Ok(slices)
}
