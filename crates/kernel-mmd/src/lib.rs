//! Permutation null distributions for kernel MMD two-sample tests
//!
//! This crate estimates the null distribution of a Maximum Mean Discrepancy
//! statistic by relabeling the pooled samples of a precomputed kernel matrix:
//!
//! - **Statistics**: biased-full, unbiased-full and unbiased-incomplete MMD
//!   estimators over any kernel accessor
//! - **Within-block permutation batch**: draws seeded permutations and
//!   re-evaluates the statistic through an index gather, never copying the
//!   matrix or evaluating the kernel again
//!
//! # Overview
//!
//! Under the null hypothesis both sample sets come from the same
//! distribution, so the pooled samples are exchangeable. Relabeling which
//! indices belong to P and Q and reusing the existing kernel values is
//! equivalent to reshuffling the samples and recomputing the kernel matrix,
//! at a fraction of the cost.
//!
//! # Examples
//!
//! ```rust
//! use kernel_core::KernelMatrix;
//! use kernel_mmd::{MmdStatistic, StatisticType, WithinBlockPermutationBatch};
//!
//! // Two samples in P, two in Q
//! let gram = vec![
//!     1.0, 0.8, 0.1, 0.2,
//!     0.8, 1.0, 0.2, 0.1,
//!     0.1, 0.2, 1.0, 0.7,
//!     0.2, 0.1, 0.7, 1.0,
//! ];
//! let km = KernelMatrix::new(&gram, 4).unwrap();
//!
//! let batch = WithinBlockPermutationBatch::new(2, 2, 100, StatisticType::BiasedFull)
//!     .unwrap()
//!     .with_seed(12345);
//!
//! let observed = batch.statistic().compute(&km).unwrap();
//! let null_samples = batch.evaluate(&km).unwrap();
//! assert_eq!(null_samples.len(), 100);
//!
//! let exceed = null_samples.iter().filter(|&&s| s >= observed).count();
//! println!("observed {observed:.4}, {exceed} of 100 null samples at least as large");
//! ```

pub mod batch;
pub mod config;
pub mod statistic;
mod types;

// Re-exports
pub use batch::WithinBlockPermutationBatch;
pub use config::{
    PermutationConfig, DEFAULT_NULL_SAMPLES, DEFAULT_SEED, FAST_NULL_SAMPLES,
    HIGH_PRECISION_NULL_SAMPLES,
};
pub use statistic::{BiasedFull, MmdStatistic, Statistic, UnbiasedFull, UnbiasedIncomplete};
pub use types::{BlockSplit, StatisticType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BlockSplit, MmdStatistic, PermutationConfig, Statistic, StatisticType,
        WithinBlockPermutationBatch,
    };
    pub use kernel_core::prelude::*;
}
