//! Kernel two-sample testing toolkit
//!
//! Re-exports the workspace crates:
//!
//! - [`kernel_core`]: kernel matrix views, seeded permutations, execution engines
//! - [`kernel_mmd`]: MMD statistics and the within-block permutation batch

pub use kernel_core;
pub use kernel_mmd;

pub use kernel_core::{Error, KernelMatrix, PermutationSource, Result};
pub use kernel_mmd::{
    BiasedFull, BlockSplit, MmdStatistic, PermutationConfig, Statistic, StatisticType,
    UnbiasedFull, UnbiasedIncomplete, WithinBlockPermutationBatch,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use kernel_mmd::prelude::*;
}
