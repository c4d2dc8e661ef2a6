//! Message-passing backend
//!
//! Runs `W` ranks, each on its own named OS thread with its own buffers.
//! Only rank 0 sees the input plane. Every rank follows the same program:
//!
//! 1. receive the partition plan (broadcast)
//! 2. receive its input range (scatter)
//! 3. count a local histogram
//! 4. all-reduce the histograms into the global one
//! 5. build the LUT and remap its range
//! 6. send its output to rank 0 (gather), which assembles the plane
//! 7. barrier

mod comm;

pub use comm::{Communicator, ROOT};

use crate::equalizer::Equalizer;
use crate::gather::assemble;
use crate::histogram::Histogram;
use crate::lut::Lut;
use crate::partition::PartitionPlan;
use crate::remap::remap;
use crate::{EqualizeError, EqualizeResult};
use histeq_core::PixelBuffer;
use std::thread;

/// Rank-per-thread equalizer.
#[derive(Debug, Clone)]
pub struct MessagePassing {
    workers: usize,
}

impl MessagePassing {
    /// Create a backend that spawns `workers` ranks per run.
    pub fn new(workers: usize) -> EqualizeResult<Self> {
        if workers == 0 {
            return Err(EqualizeError::InvalidParameters(
                "worker count must be >= 1".into(),
            ));
        }
        Ok(Self { workers })
    }
}

/// The per-rank program. Returns the assembled plane on rank 0.
fn run_rank(mut comm: Communicator, input: Option<&[u8]>) -> EqualizeResult<Option<PixelBuffer>> {
    let plan = match input {
        Some(data) => Some(PartitionPlan::new(data.len(), comm.size())?),
        None => None,
    };
    let plan = comm.broadcast_plan(plan)?;
    let local = comm.scatter(&plan, input)?;

    let hist = Histogram::from_samples(&local);
    let global = comm.all_reduce_sum(hist)?;
    log::debug!(
        "rank {}: {} local samples, {} global",
        comm.rank(),
        local.len(),
        global.total()
    );

    let lut = Lut::build(&global, plan.total() as u64);
    let out = remap(&local, &lut);

    let result = match comm.gather(out)? {
        Some(parts) => Some(assemble(&plan, parts)?),
        None => None,
    };

    comm.barrier()?;
    comm.finalize();
    Ok(result)
}

/// Pick the error to report: the first one that is not a peer reacting
/// to someone else's failure, else the first one.
fn root_cause(errors: Vec<EqualizeError>) -> Option<EqualizeError> {
    let idx = errors
        .iter()
        .position(|e| !matches!(e, EqualizeError::Coordination(_)))
        .unwrap_or(0);
    errors.into_iter().nth(idx)
}

impl Equalizer for MessagePassing {
    fn workers(&self) -> usize {
        self.workers
    }

    fn name(&self) -> &'static str {
        "message-passing"
    }

    fn equalize(&self, plane: &PixelBuffer) -> EqualizeResult<PixelBuffer> {
        let comms = Communicator::world(self.workers)?;
        log::debug!(
            "message-passing: {} samples over {} ranks",
            plane.len(),
            self.workers
        );

        thread::scope(|s| {
            let mut handles = Vec::with_capacity(comms.len());
            let mut errors = Vec::new();

            for comm in comms {
                let rank = comm.rank();
                let input = comm.is_root().then_some(plane.as_slice());
                let spawned = thread::Builder::new()
                    .name(format!("histeq-rank-{}", rank))
                    .spawn_scoped(s, move || run_rank(comm, input));
                match spawned {
                    Ok(handle) => handles.push((rank, handle)),
                    Err(e) => {
                        // The unspawned communicator was dropped with the
                        // closure, which aborts the ranks already running.
                        errors.push(EqualizeError::Coordination(format!(
                            "failed to spawn rank {}: {}",
                            rank, e
                        )));
                        break;
                    }
                }
            }

            let mut result = None;
            for (rank, handle) in handles {
                match handle.join() {
                    Ok(Ok(Some(buf))) => result = Some(buf),
                    Ok(Ok(None)) => {}
                    Ok(Err(e)) => errors.push(e),
                    Err(_) => {
                        log::warn!("rank {} panicked", rank);
                        errors.push(EqualizeError::Coordination(format!(
                            "rank {} panicked",
                            rank
                        )));
                    }
                }
            }

            if let Some(err) = root_cause(errors) {
                return Err(err);
            }
            result.ok_or_else(|| {
                EqualizeError::Coordination("root rank returned no output".into())
            })
        })
    }
}
