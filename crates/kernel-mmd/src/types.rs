//! Common types for MMD null-distribution estimation

use kernel_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which MMD estimator a batch evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticType {
    /// Block means including diagonal terms
    BiasedFull,
    /// Within-block means excluding diagonal terms
    UnbiasedFull,
    /// Position-paired off-diagonal terms, requires `n == m`
    UnbiasedIncomplete,
}

impl StatisticType {
    /// All supported statistic types
    pub const ALL: [StatisticType; 3] = [
        StatisticType::BiasedFull,
        StatisticType::UnbiasedFull,
        StatisticType::UnbiasedIncomplete,
    ];

    /// Get the name of this statistic
    pub fn name(&self) -> &'static str {
        match self {
            Self::BiasedFull => "biased_full",
            Self::UnbiasedFull => "unbiased_full",
            Self::UnbiasedIncomplete => "unbiased_incomplete",
        }
    }

    /// Smallest block size for which the estimator is defined
    pub fn min_block_size(&self) -> usize {
        match self {
            Self::BiasedFull => 1,
            Self::UnbiasedFull | Self::UnbiasedIncomplete => 2,
        }
    }
}

impl Default for StatisticType {
    fn default() -> Self {
        Self::BiasedFull
    }
}

impl fmt::Display for StatisticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatisticType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::configuration(format!("unknown statistic type '{s}'")))
    }
}

/// Sizes of the two virtual sample sets: the first `n` indices form P, the next `m` form Q
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSplit {
    /// Number of samples in P
    pub n: usize,
    /// Number of samples in Q
    pub m: usize,
}

impl BlockSplit {
    /// Create a block split
    pub fn new(n: usize, m: usize) -> Self {
        Self { n, m }
    }

    /// Total number of pooled samples, `n + m`
    pub fn total(&self) -> usize {
        self.n + self.m
    }

    /// Check that the split is valid for `statistic`
    pub fn validate_for(&self, statistic: StatisticType) -> Result<()> {
        let required = statistic.min_block_size();
        if self.n < required {
            return Err(Error::insufficient_block("P", required, self.n, statistic.name()));
        }
        if self.m < required {
            return Err(Error::insufficient_block("Q", required, self.m, statistic.name()));
        }
        if statistic == StatisticType::UnbiasedIncomplete && self.n != self.m {
            return Err(Error::configuration(format!(
                "{statistic} requires equal block sizes, got n={} and m={}",
                self.n, self.m
            )));
        }
        Ok(())
    }
}

impl fmt::Display for BlockSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(n={}, m={})", self.n, self.m)
    }
}
