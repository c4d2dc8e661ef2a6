//! Rank-to-rank communication
//!
//! A [`Communicator`] is one rank's endpoint into a world of `size`
//! ranks. Ranks share no memory: every value crosses between them by
//! being moved through a channel. Collectives are rooted at rank 0 and
//! block until every rank has reached them.
//!
//! A communicator dropped without [`Communicator::finalize`] (an early
//! error return or a panic) sends `Abort` to all peers, so a blocked
//! collective fails with [`EqualizeError::Coordination`] instead of
//! waiting forever.

use crate::histogram::Histogram;
use crate::merge;
use crate::partition::PartitionPlan;
use crate::{EqualizeError, EqualizeResult};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

/// Rank that roots every collective.
pub const ROOT: usize = 0;

#[derive(Debug)]
pub(crate) enum Payload {
    Plan(PartitionPlan),
    Samples(Vec<u8>),
    Histogram(Histogram),
    Barrier,
    Abort,
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Plan(_) => "plan",
            Payload::Samples(_) => "samples",
            Payload::Histogram(_) => "histogram",
            Payload::Barrier => "barrier",
            Payload::Abort => "abort",
        }
    }
}

#[derive(Debug)]
pub(crate) struct Envelope {
    source: usize,
    payload: Payload,
}

/// One rank's endpoint.
pub struct Communicator {
    rank: usize,
    senders: Vec<Sender<Envelope>>,
    inbox: Receiver<Envelope>,
    /// Messages that arrived from a rank other than the one being waited on
    pending: Vec<VecDeque<Payload>>,
    finalized: bool,
}

impl Communicator {
    /// Create a fully connected world of `size` ranks, in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::InvalidParameters`] if `size` is 0.
    pub fn world(size: usize) -> EqualizeResult<Vec<Communicator>> {
        if size == 0 {
            return Err(EqualizeError::InvalidParameters(
                "world size must be >= 1".into(),
            ));
        }

        let (senders, inboxes): (Vec<_>, Vec<_>) = (0..size).map(|_| mpsc::channel()).unzip();
        Ok(inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| Communicator {
                rank,
                senders: senders.clone(),
                inbox,
                pending: (0..size).map(|_| VecDeque::new()).collect(),
                finalized: false,
            })
            .collect())
    }

    /// This rank's index.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of ranks in the world.
    #[inline]
    pub fn size(&self) -> usize {
        self.senders.len()
    }

    /// True for the rank that roots collectives.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.rank == ROOT
    }

    fn send(&self, dest: usize, payload: Payload) -> EqualizeResult<()> {
        let kind = payload.kind();
        self.senders[dest]
            .send(Envelope {
                source: self.rank,
                payload,
            })
            .map_err(|_| {
                EqualizeError::Coordination(format!(
                    "rank {} could not send {} to rank {}: peer has exited",
                    self.rank, kind, dest
                ))
            })
    }

    fn recv_from(&mut self, source: usize) -> EqualizeResult<Payload> {
        if let Some(payload) = self.pending[source].pop_front() {
            return Ok(payload);
        }
        loop {
            let env = self.inbox.recv().map_err(|_| {
                EqualizeError::Coordination(format!("rank {} inbox closed", self.rank))
            })?;
            if let Payload::Abort = env.payload {
                return Err(EqualizeError::Coordination(format!(
                    "rank {} aborted",
                    env.source
                )));
            }
            if env.source == source {
                return Ok(env.payload);
            }
            self.pending[env.source].push_back(env.payload);
        }
    }

    fn unexpected(&self, source: usize, expected: &str, got: &Payload) -> EqualizeError {
        EqualizeError::Coordination(format!(
            "rank {} expected {} from rank {}, got {}",
            self.rank,
            expected,
            source,
            got.kind()
        ))
    }

    fn recv_samples(&mut self, source: usize) -> EqualizeResult<Vec<u8>> {
        match self.recv_from(source)? {
            Payload::Samples(samples) => Ok(samples),
            other => Err(self.unexpected(source, "samples", &other)),
        }
    }

    fn recv_histogram(&mut self, source: usize) -> EqualizeResult<Histogram> {
        match self.recv_from(source)? {
            Payload::Histogram(hist) => Ok(hist),
            other => Err(self.unexpected(source, "histogram", &other)),
        }
    }

    fn recv_barrier(&mut self, source: usize) -> EqualizeResult<()> {
        match self.recv_from(source)? {
            Payload::Barrier => Ok(()),
            other => Err(self.unexpected(source, "barrier", &other)),
        }
    }

    /// Distribute the root's partition plan to every rank.
    ///
    /// The root passes `Some(plan)`; other ranks pass `None`.
    pub fn broadcast_plan(&mut self, plan: Option<PartitionPlan>) -> EqualizeResult<PartitionPlan> {
        if self.is_root() {
            let plan = plan.ok_or_else(|| {
                EqualizeError::InvalidParameters("root must supply the partition plan".into())
            })?;
            for dest in 1..self.size() {
                self.send(dest, Payload::Plan(plan.clone()))?;
            }
            Ok(plan)
        } else {
            match self.recv_from(ROOT)? {
                Payload::Plan(plan) => Ok(plan),
                other => Err(self.unexpected(ROOT, "plan", &other)),
            }
        }
    }

    /// Hand each rank a private copy of its input range.
    ///
    /// The root passes the whole plane; other ranks pass `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::PartitionMismatch`] if a received range does
    /// not have the planned length.
    pub fn scatter(&mut self, plan: &PartitionPlan, data: Option<&[u8]>) -> EqualizeResult<Vec<u8>> {
        let own = plan.partition(self.rank)?;

        if self.is_root() {
            let data = data.ok_or_else(|| {
                EqualizeError::InvalidParameters("root must supply the input plane".into())
            })?;
            if data.len() != plan.total() {
                return Err(EqualizeError::PartitionMismatch {
                    rank: ROOT,
                    expected: plan.total(),
                    actual: data.len(),
                });
            }
            for p in &plan.partitions()[1..] {
                self.send(p.rank, Payload::Samples(data[p.range()].to_vec()))?;
            }
            Ok(data[own.range()].to_vec())
        } else {
            let samples = self.recv_samples(ROOT)?;
            if samples.len() != own.count {
                return Err(EqualizeError::PartitionMismatch {
                    rank: self.rank,
                    expected: own.count,
                    actual: samples.len(),
                });
            }
            Ok(samples)
        }
    }

    /// Sum every rank's histogram; every rank receives the same result.
    ///
    /// Implemented as a reduce at the root followed by a broadcast of the
    /// root's sum.
    pub fn all_reduce_sum(&mut self, local: Histogram) -> EqualizeResult<Histogram> {
        if self.is_root() {
            let mut locals = Vec::with_capacity(self.size());
            locals.push(local);
            for source in 1..self.size() {
                locals.push(self.recv_histogram(source)?);
            }
            let global = merge::reduce(&locals)?;
            for dest in 1..self.size() {
                self.send(dest, Payload::Histogram(global.clone()))?;
            }
            Ok(global)
        } else {
            self.send(ROOT, Payload::Histogram(local))?;
            self.recv_histogram(ROOT)
        }
    }

    /// Collect every rank's output at the root, in rank order.
    ///
    /// Returns `Some(parts)` at the root and `None` elsewhere.
    pub fn gather(&mut self, part: Vec<u8>) -> EqualizeResult<Option<Vec<Vec<u8>>>> {
        if self.is_root() {
            let mut parts = Vec::with_capacity(self.size());
            parts.push(part);
            for source in 1..self.size() {
                parts.push(self.recv_samples(source)?);
            }
            Ok(Some(parts))
        } else {
            self.send(ROOT, Payload::Samples(part))?;
            Ok(None)
        }
    }

    /// Block until every rank has reached the barrier.
    pub fn barrier(&mut self) -> EqualizeResult<()> {
        if self.is_root() {
            for source in 1..self.size() {
                self.recv_barrier(source)?;
            }
            for dest in 1..self.size() {
                self.send(dest, Payload::Barrier)?;
            }
            Ok(())
        } else {
            self.send(ROOT, Payload::Barrier)?;
            self.recv_barrier(ROOT)
        }
    }

    /// Leave the world cleanly. Peers are not notified.
    pub fn finalize(mut self) {
        self.finalized = true;
    }
}

impl Drop for Communicator {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        log::warn!("rank {} exiting without finalize, aborting peers", self.rank);
        for (dest, tx) in self.senders.iter().enumerate() {
            if dest != self.rank {
                let _ = tx.send(Envelope {
                    source: self.rank,
                    payload: Payload::Abort,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_world_zero_size() {
        assert!(Communicator::world(0).is_err());
    }

    #[test]
    fn test_all_reduce_every_rank_agrees() {
        let comms = Communicator::world(4).unwrap();
        let results: Vec<Histogram> = thread::scope(|s| {
            let handles: Vec<_> = comms
                .into_iter()
                .map(|mut comm| {
                    s.spawn(move || {
                        let v = comm.rank() as u8 * 10;
                        let global = comm
                            .all_reduce_sum(Histogram::from_samples(&[v, v]))
                            .unwrap();
                        comm.barrier().unwrap();
                        comm.finalize();
                        global
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for global in &results {
            assert_eq!(global, &results[0]);
            assert_eq!(global.total(), 8);
            assert_eq!(global[30], 2);
        }
    }

    #[test]
    fn test_gather_in_rank_order() {
        let comms = Communicator::world(3).unwrap();
        let gathered = thread::scope(|s| {
            let handles: Vec<_> = comms
                .into_iter()
                .map(|mut comm| {
                    s.spawn(move || {
                        let part = vec![comm.rank() as u8; comm.rank() + 1];
                        let parts = comm.gather(part).unwrap();
                        comm.finalize();
                        parts
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(
            gathered[0],
            Some(vec![vec![0], vec![1, 1], vec![2, 2, 2]])
        );
        assert!(gathered[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_dropped_rank_aborts_peer() {
        let mut comms = Communicator::world(2).unwrap();
        let mut rank1 = comms.pop().unwrap();
        drop(comms);
        assert!(matches!(
            rank1.barrier(),
            Err(EqualizeError::Coordination(_))
        ));
        rank1.finalize();
    }

    #[test]
    fn test_scatter_length_mismatch() {
        let plan = PartitionPlan::new(4, 2).unwrap();
        let mut comms = Communicator::world(2).unwrap();
        let mut rank1 = comms.pop().unwrap();
        let root = comms.pop().unwrap();
        root.send(1, Payload::Samples(vec![1, 2, 3])).unwrap();
        assert!(matches!(
            rank1.scatter(&plan, None),
            Err(EqualizeError::PartitionMismatch {
                rank: 1,
                expected: 2,
                actual: 3
            })
        ));
        root.finalize();
        rank1.finalize();
    }
}
