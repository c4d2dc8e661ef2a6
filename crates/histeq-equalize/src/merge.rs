//! Histogram merging
//!
//! The global histogram is the elementwise sum of the local ones. Both
//! execution models end up calling [`reduce`]: the shared-memory backend
//! after joining its counting tasks, the message-passing backend at the
//! root of its all-reduce.

use crate::histogram::Histogram;
use crate::{EqualizeError, EqualizeResult};

/// Sum `locals` bin by bin.
///
/// # Errors
///
/// Returns [`EqualizeError::InvalidParameters`] if `locals` is empty:
/// there is always at least one worker, so an empty set means a
/// histogram was lost.
pub fn reduce(locals: &[Histogram]) -> EqualizeResult<Histogram> {
    let (first, rest) = locals.split_first().ok_or_else(|| {
        EqualizeError::InvalidParameters("no local histograms to merge".into())
    })?;

    let mut global = first.clone();
    for local in rest {
        global.accumulate(local);
    }
    log::debug!(
        "merged {} local histograms, {} samples",
        locals.len(),
        global.total()
    );
    Ok(global)
}
