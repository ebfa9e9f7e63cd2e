//! Configuration management for iterative-scan clustering

use serde::{Serialize, Deserialize};
use crate::cluster::driver::DEFAULT_FAILURE_THRESHOLD;
use crate::cluster::MetricKind;
use crate::error::{ClusterError, Result};

/// Settings for one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Density formula to maximize
    pub metric: MetricKind,

    /// Consecutive duplicate discoveries that end random-restart discovery
    pub failure_threshold: usize,

    /// Fixed seed for edge sampling; `None` draws one from the OS
    pub rng_seed: Option<u64>,

    /// Worker threads for parallel seeded runs (0 = all cores)
    pub threads: usize,

    /// Optimize explicit seeds concurrently
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metric: MetricKind::AverageDegree,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            rng_seed: None,
            threads: 0,
            parallel: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        metric: MetricKind,
        failure_threshold: usize,
        rng_seed: Option<u64>,
        threads: usize,
        parallel: bool,
    ) -> Self {
        Self {
            metric,
            failure_threshold,
            rng_seed,
            threads,
            parallel,
        }
    }

    /// Reject settings no run could use
    pub fn validate(&self) -> Result<()> {
        if self.failure_threshold == 0 {
            return Err(ClusterError::InvalidFailureThreshold(self.failure_threshold));
        }
        Ok(())
    }

    /// Thread count with 0 resolved to the number of cores
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }
}
