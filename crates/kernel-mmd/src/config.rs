//! Serializable configuration for permutation batches

use crate::{batch::WithinBlockPermutationBatch, types::{BlockSplit, StatisticType}};
use kernel_core::{Error, Result, SequentialEngine};
use serde::{Deserialize, Serialize};

/// Default number of null samples per batch
pub const DEFAULT_NULL_SAMPLES: usize = 250;

/// Number of null samples for quick, coarse estimates
pub const FAST_NULL_SAMPLES: usize = 100;

/// Number of null samples for high-precision thresholds
pub const HIGH_PRECISION_NULL_SAMPLES: usize = 10000;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

fn default_null_samples() -> usize {
    DEFAULT_NULL_SAMPLES
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Complete description of one permutation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationConfig {
    /// Number of samples in P
    pub n: usize,
    /// Number of samples in Q
    pub m: usize,
    /// Number of permutation trials
    #[serde(default = "default_null_samples")]
    pub num_null_samples: usize,
    /// Estimator evaluated in each trial
    #[serde(default)]
    pub statistic: StatisticType,
    /// Seed of the permutation stream
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl PermutationConfig {
    /// Configuration with default trial count, statistic and seed
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            n,
            m,
            num_null_samples: DEFAULT_NULL_SAMPLES,
            statistic: StatisticType::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Set the estimator
    pub fn with_statistic(mut self, statistic: StatisticType) -> Self {
        self.statistic = statistic;
        self
    }

    /// Set the number of permutation trials
    pub fn with_null_samples(mut self, num_null_samples: usize) -> Self {
        self.num_null_samples = num_null_samples;
        self
    }

    /// Set the permutation seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Block split described by this configuration
    pub fn block_split(&self) -> BlockSplit {
        BlockSplit::new(self.n, self.m)
    }

    /// Check the configuration without building a batch
    pub fn validate(&self) -> Result<()> {
        if self.num_null_samples == 0 {
            return Err(Error::configuration("number of null samples must be positive"));
        }
        self.block_split().validate_for(self.statistic)
    }

    /// Build the sequential batch driver this configuration describes
    pub fn into_batch(self) -> Result<WithinBlockPermutationBatch<SequentialEngine>> {
        self.validate()?;
        Ok(
            WithinBlockPermutationBatch::new(self.n, self.m, self.num_null_samples, self.statistic)?
                .with_seed(self.seed),
        )
    }
}
