//! Within-block permutation null distribution
//!
//! Each trial draws a fresh permutation of all `n + m` pooled indices, views
//! the kernel matrix through it, and evaluates the configured statistic with
//! the original block split. The first `n` permuted positions become the new
//! P and the rest the new Q, which is a random relabeling of the pooled
//! samples that reuses every kernel value verbatim.
//!
//! Permutations are drawn sequentially from a seeded [`PermutationSource`]
//! before trials are handed to the execution engine, so the null samples are
//! identical whichever engine runs them.

use crate::{
    config::DEFAULT_SEED,
    statistic::{MmdStatistic, Statistic},
    types::{BlockSplit, StatisticType},
};
use kernel_core::{
    Error, ExecutionEngine, KernelMatrix, PermutationSource, PermutedKernel, Result,
    SequentialEngine,
};
use tracing::{debug, instrument};

/// Permutations drawn ahead per engine thread before a chunk of trials runs
const PERMUTATIONS_PER_THREAD: usize = 32;

/// Batch driver producing `num_null_samples` permuted MMD statistics
#[derive(Debug, Clone)]
pub struct WithinBlockPermutationBatch<E = SequentialEngine> {
    statistic: Statistic,
    num_null_samples: usize,
    seed: u64,
    engine: E,
}

impl WithinBlockPermutationBatch<SequentialEngine> {
    /// Create a sequential batch for blocks of size `n` and `m`
    ///
    /// Fails with a configuration error if the block split is invalid for
    /// `statistic_type` or if `num_null_samples` is zero.
    pub fn new(
        n: usize,
        m: usize,
        num_null_samples: usize,
        statistic_type: StatisticType,
    ) -> Result<Self> {
        if num_null_samples == 0 {
            return Err(Error::configuration("number of null samples must be positive"));
        }
        let statistic = Statistic::new(statistic_type, BlockSplit::new(n, m))?;
        Ok(Self {
            statistic,
            num_null_samples,
            seed: DEFAULT_SEED,
            engine: SequentialEngine::new(),
        })
    }
}

impl<E: ExecutionEngine> WithinBlockPermutationBatch<E> {
    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run trials on a different execution engine
    pub fn with_engine<E2: ExecutionEngine>(self, engine: E2) -> WithinBlockPermutationBatch<E2> {
        WithinBlockPermutationBatch {
            statistic: self.statistic,
            num_null_samples: self.num_null_samples,
            seed: self.seed,
            engine,
        }
    }

    /// The statistic evaluated in every trial
    pub fn statistic(&self) -> &Statistic {
        &self.statistic
    }

    /// Block split the statistic is evaluated with
    pub fn block_split(&self) -> BlockSplit {
        self.statistic.block_split()
    }

    /// Number of trials per evaluation
    pub fn num_null_samples(&self) -> usize {
        self.num_null_samples
    }

    /// Seed used by [`evaluate`](Self::evaluate)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Execution engine running the trials
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Sample the null distribution, drawing permutations from a source seeded with [`seed`](Self::seed)
    pub fn evaluate(&self, kernel_matrix: &KernelMatrix<'_>) -> Result<Vec<f64>> {
        let mut source = PermutationSource::new(self.seed);
        self.evaluate_with_source(kernel_matrix, &mut source)
    }

    /// Sample the null distribution, continuing the stream of `source`
    ///
    /// Trial `t` uses the `t`-th permutation drawn by this call; the source
    /// is left positioned after the last draw.
    #[instrument(skip(self, kernel_matrix, source), fields(
        statistic = %self.statistic.statistic_type(),
        split = %self.block_split(),
        num_null_samples = self.num_null_samples
    ))]
    pub fn evaluate_with_source(
        &self,
        kernel_matrix: &KernelMatrix<'_>,
        source: &mut PermutationSource,
    ) -> Result<Vec<f64>> {
        let total = self.block_split().total();
        kernel_matrix.ensure_size(total)?;

        let chunk_size = (self.engine.num_threads() * PERMUTATIONS_PER_THREAD).max(1);
        debug!(
            "Running {} permutation trials in chunks of {} ({:?})",
            self.num_null_samples,
            chunk_size,
            self.engine.strategy()
        );

        let statistic = &self.statistic;
        let matrix = *kernel_matrix;
        let mut null_samples = Vec::with_capacity(self.num_null_samples);
        while null_samples.len() < self.num_null_samples {
            let count = chunk_size.min(self.num_null_samples - null_samples.len());
            let permutations = source.draw_batch(count, total);
            let chunk = self.engine.execute_batch(count, |t| {
                let permuted = PermutedKernel::new(matrix, &permutations[t]);
                statistic.evaluate(&permuted)
            });
            null_samples.extend(chunk);
        }

        debug!("Permutation batch completed with {} null samples", null_samples.len());
        Ok(null_samples)
    }
}
