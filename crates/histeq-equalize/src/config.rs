//! Execution configuration
//!
//! The worker count and execution model are resolved once at startup and
//! passed explicitly to the backend.
//!
//! # Environment Variables
//!
//! - `HISTEQ_WORKERS`: positive integer, default is the number of CPUs
//! - `HISTEQ_MODEL`: `shared` (default) or `message`. `shared-memory` and
//!   `openmp` are accepted for `shared`; `message-passing` and `mpi` for
//!   `message`. Matching ignores case.

use crate::equalizer::Equalizer;
use crate::message::MessagePassing;
use crate::shared::SharedMemory;
use crate::{EqualizeError, EqualizeResult};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the worker count.
pub const WORKERS_ENV: &str = "HISTEQ_WORKERS";
/// Environment variable holding the execution model.
pub const MODEL_ENV: &str = "HISTEQ_MODEL";

/// How workers cooperate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecModel {
    /// One rayon pool inside the process
    #[default]
    SharedMemory,
    /// Isolated ranks exchanging messages
    MessagePassing,
}

impl FromStr for ExecModel {
    type Err = EqualizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" | "shared-memory" | "openmp" => Ok(Self::SharedMemory),
            "message" | "message-passing" | "mpi" => Ok(Self::MessagePassing),
            other => Err(EqualizeError::InvalidParameters(format!(
                "{} must be 'shared' or 'message', got '{}'",
                MODEL_ENV, other
            ))),
        }
    }
}

impl fmt::Display for ExecModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedMemory => f.write_str("shared-memory"),
            Self::MessagePassing => f.write_str("message-passing"),
        }
    }
}

/// Worker count and execution model for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecConfig {
    workers: usize,
    model: ExecModel,
}

impl ExecConfig {
    /// # Errors
    ///
    /// Returns [`EqualizeError::InvalidParameters`] if `workers` is 0.
    pub fn new(workers: usize, model: ExecModel) -> EqualizeResult<Self> {
        if workers == 0 {
            return Err(EqualizeError::InvalidParameters(format!(
                "{} must be >= 1",
                WORKERS_ENV
            )));
        }
        Ok(Self { workers, model })
    }

    /// Resolve from the process environment.
    pub fn from_env() -> EqualizeResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> EqualizeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let workers = match lookup(WORKERS_ENV) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                EqualizeError::InvalidParameters(format!(
                    "{} must be a positive integer, got '{}'",
                    WORKERS_ENV, raw
                ))
            })?,
            None => num_cpus::get(),
        };
        let model = match lookup(MODEL_ENV) {
            Some(raw) => raw.parse()?,
            None => ExecModel::default(),
        };
        Self::new(workers, model)
    }

    /// Number of workers.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Execution model.
    #[inline]
    pub fn model(&self) -> ExecModel {
        self.model
    }

    /// Construct the backend this configuration selects.
    pub fn build(&self) -> EqualizeResult<Box<dyn Equalizer>> {
        log::info!("using {} model with {} workers", self.model, self.workers);
        Ok(match self.model {
            ExecModel::SharedMemory => Box::new(SharedMemory::new(self.workers)?),
            ExecModel::MessagePassing => Box::new(MessagePassing::new(self.workers)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ExecConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.workers(), num_cpus::get());
        assert_eq!(cfg.model(), ExecModel::SharedMemory);
    }

    #[test]
    fn test_explicit_values() {
        let cfg = ExecConfig::from_lookup(lookup_from(&[
            (WORKERS_ENV, " 3 "),
            (MODEL_ENV, "Message"),
        ]))
        .unwrap();
        assert_eq!(cfg.workers(), 3);
        assert_eq!(cfg.model(), ExecModel::MessagePassing);
    }

    #[test]
    fn test_model_aliases() {
        for name in ["shared", "shared-memory", "OpenMP"] {
            assert_eq!(name.parse::<ExecModel>().unwrap(), ExecModel::SharedMemory);
        }
        for name in ["message", "Message-Passing", "mpi"] {
            assert_eq!(name.parse::<ExecModel>().unwrap(), ExecModel::MessagePassing);
        }
    }

    #[test]
    fn test_invalid_values() {
        assert!(ExecConfig::from_lookup(lookup_from(&[(WORKERS_ENV, "0")])).is_err());
        assert!(ExecConfig::from_lookup(lookup_from(&[(WORKERS_ENV, "four")])).is_err());
        assert!(ExecConfig::from_lookup(lookup_from(&[(MODEL_ENV, "gpu")])).is_err());
    }

    #[test]
    fn test_build_selects_backend() {
        let eq = ExecConfig::new(2, ExecModel::MessagePassing)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(eq.name(), "message-passing");
        assert_eq!(eq.workers(), 2);

        let eq = ExecConfig::new(2, ExecModel::SharedMemory)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(eq.name(), "shared-memory");
    }
}
