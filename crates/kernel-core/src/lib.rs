//! Core types for kernel two-sample testing
//!
//! This crate provides the building blocks that the MMD permutation engine
//! is assembled from:
//!
//! - **Kernel matrix views**: borrowed, read-only access to a precomputed
//!   Gram matrix, either directly or through a permutation (gather) view
//! - **Permutation source**: a seeded, reproducible stream of uniformly
//!   random permutations
//! - **Execution engines**: sequential or rayon-backed scheduling of
//!   independent trials, always returning results in trial order
//!
//! # Example
//!
//! ```rust
//! use kernel_core::{KernelAccess, KernelMatrix, PermutationSource};
//!
//! let gram = vec![
//!     1.0, 0.5, 0.1,
//!     0.5, 1.0, 0.3,
//!     0.1, 0.3, 1.0,
//! ];
//! let km = KernelMatrix::new(&gram, 3).unwrap();
//!
//! let mut source = PermutationSource::new(12345);
//! let perm = source.next_permutation(km.size());
//! let view = km.permuted(&perm).unwrap();
//!
//! assert_eq!(view.get(0, 1), km.get(perm[0], perm[1]));
//! ```

pub mod error;
pub mod execution;
pub mod matrix;
pub mod permutation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{auto_engine, sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use matrix::{KernelAccess, KernelMatrix, PermutedKernel};
pub use permutation::{permute_in_place, PermutationSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{
        ExecutionEngine, ExecutionStrategy, KernelAccess, KernelMatrix, PermutationSource,
        PermutedKernel, Result, SequentialEngine,
    };

    #[cfg(feature = "parallel")]
    pub use crate::ParallelEngine;
}
