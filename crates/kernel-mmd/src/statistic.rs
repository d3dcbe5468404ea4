//! MMD statistic formulas
//!
//! Each estimator maps a square kernel matrix (or any [`KernelAccess`] view of
//! one) and a block split `(n, m)` to a scalar. Indices `0..n` form block P
//! and `n..n+m` form block Q. All three formulas are pure.
//!
//! The formulas only ever read the matrix through `KernelAccess`, and always
//! visit entries in the same order, so evaluating a [`PermutedKernel`] view
//! gives exactly the same value as evaluating an explicitly permuted copy.
//!
//! [`PermutedKernel`]: kernel_core::PermutedKernel

use crate::types::{BlockSplit, StatisticType};
use kernel_core::{KernelAccess, KernelMatrix, Result};

/// Common contract of the MMD estimators
pub trait MmdStatistic {
    /// The estimator this formula implements
    fn statistic_type(&self) -> StatisticType;

    /// Block split the formula evaluates with
    fn block_split(&self) -> BlockSplit;

    /// Evaluate the statistic through a kernel accessor of size `n + m`
    fn evaluate<K: KernelAccess + ?Sized>(&self, kernel: &K) -> f64;

    /// Evaluate on a kernel matrix, checking its shape first
    fn compute(&self, kernel_matrix: &KernelMatrix<'_>) -> Result<f64> {
        kernel_matrix.ensure_size(self.block_split().total())?;
        Ok(self.evaluate(kernel_matrix))
    }
}

/// Sums of kernel values over the three blocks
#[derive(Debug, Clone, Copy, Default)]
struct BlockSums {
    pp: f64,
    qq: f64,
    pq: f64,
}

/// Accumulate the P×P, Q×Q and P×Q block sums in row-major order
///
/// The cross block is read from the upper-right quadrant only.
fn block_sums<K: KernelAccess + ?Sized>(kernel: &K, n: usize, m: usize, diagonal: bool) -> BlockSums {
    let total = n + m;
    let mut sums = BlockSums::default();

    for i in 0..n {
        for j in 0..n {
            if diagonal || i != j {
                sums.pp += kernel.get(i, j);
            }
        }
        for j in n..total {
            sums.pq += kernel.get(i, j);
        }
    }
    for i in n..total {
        for j in n..total {
            if diagonal || i != j {
                sums.qq += kernel.get(i, j);
            }
        }
    }
    sums
}

/// Biased MMD estimate with diagonal terms kept
///
/// `mean(K_pp) + mean(K_qq) - 2 mean(K_pq)` with the within-block means
/// normalized by `n^2` and `m^2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiasedFull {
    split: BlockSplit,
}

impl BiasedFull {
    /// Create the estimator for blocks of size `n` and `m`
    pub fn new(n: usize, m: usize) -> Result<Self> {
        let split = BlockSplit::new(n, m);
        split.validate_for(StatisticType::BiasedFull)?;
        Ok(Self { split })
    }
}

impl MmdStatistic for BiasedFull {
    fn statistic_type(&self) -> StatisticType {
        StatisticType::BiasedFull
    }

    fn block_split(&self) -> BlockSplit {
        self.split
    }

    fn evaluate<K: KernelAccess + ?Sized>(&self, kernel: &K) -> f64 {
        let BlockSplit { n, m } = self.split;
        let sums = block_sums(kernel, n, m, true);
        let (n, m) = (n as f64, m as f64);
        sums.pp / (n * n) + sums.qq / (m * m) - 2.0 * sums.pq / (n * m)
    }
}

/// Unbiased MMD estimate over the full kernel matrix
///
/// Within-block sums drop the diagonal and are normalized by `n(n-1)` and
/// `m(m-1)`; the cross term is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnbiasedFull {
    split: BlockSplit,
}

impl UnbiasedFull {
    /// Create the estimator for blocks of size `n` and `m`
    pub fn new(n: usize, m: usize) -> Result<Self> {
        let split = BlockSplit::new(n, m);
        split.validate_for(StatisticType::UnbiasedFull)?;
        Ok(Self { split })
    }
}

impl MmdStatistic for UnbiasedFull {
    fn statistic_type(&self) -> StatisticType {
        StatisticType::UnbiasedFull
    }

    fn block_split(&self) -> BlockSplit {
        self.split
    }

    fn evaluate<K: KernelAccess + ?Sized>(&self, kernel: &K) -> f64 {
        let BlockSplit { n, m } = self.split;
        let sums = block_sums(kernel, n, m, false);
        let (n, m) = (n as f64, m as f64);
        sums.pp / (n * (n - 1.0)) + sums.qq / (m * (m - 1.0)) - 2.0 * sums.pq / (n * m)
    }
}

/// Unbiased incomplete MMD estimate pairing sample `i` of P with sample `i` of Q
///
/// `1/(n(n-1)) * sum_{i != j} K[i,j] + K[n+i,n+j] - K[i,n+j] - K[j,n+i]`,
/// a single pass over the off-diagonal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnbiasedIncomplete {
    n: usize,
}

impl UnbiasedIncomplete {
    /// Create the estimator for two blocks of size `n`
    pub fn new(n: usize) -> Result<Self> {
        BlockSplit::new(n, n).validate_for(StatisticType::UnbiasedIncomplete)?;
        Ok(Self { n })
    }
}

impl MmdStatistic for UnbiasedIncomplete {
    fn statistic_type(&self) -> StatisticType {
        StatisticType::UnbiasedIncomplete
    }

    fn block_split(&self) -> BlockSplit {
        BlockSplit::new(self.n, self.n)
    }

    fn evaluate<K: KernelAccess + ?Sized>(&self, kernel: &K) -> f64 {
        let n = self.n;
        let mut sum = 0.0;
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    sum += kernel.get(i, j) + kernel.get(n + i, n + j)
                        - kernel.get(i, n + j)
                        - kernel.get(j, n + i);
                }
            }
        }
        let n = n as f64;
        sum / (n * (n - 1.0))
    }
}

/// One of the three MMD estimators, chosen once and then reused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    BiasedFull(BiasedFull),
    UnbiasedFull(UnbiasedFull),
    UnbiasedIncomplete(UnbiasedIncomplete),
}

impl Statistic {
    /// Build the estimator of the given type, validating the block split
    pub fn new(statistic_type: StatisticType, split: BlockSplit) -> Result<Self> {
        split.validate_for(statistic_type)?;
        let statistic = match statistic_type {
            StatisticType::BiasedFull => Self::BiasedFull(BiasedFull::new(split.n, split.m)?),
            StatisticType::UnbiasedFull => {
                Self::UnbiasedFull(UnbiasedFull::new(split.n, split.m)?)
            }
            StatisticType::UnbiasedIncomplete => {
                Self::UnbiasedIncomplete(UnbiasedIncomplete::new(split.n)?)
            }
        };
        Ok(statistic)
    }
}

impl MmdStatistic for Statistic {
    fn statistic_type(&self) -> StatisticType {
        match self {
            Self::BiasedFull(s) => s.statistic_type(),
            Self::UnbiasedFull(s) => s.statistic_type(),
            Self::UnbiasedIncomplete(s) => s.statistic_type(),
        }
    }

    fn block_split(&self) -> BlockSplit {
        match self {
            Self::BiasedFull(s) => s.block_split(),
            Self::UnbiasedFull(s) => s.block_split(),
            Self::UnbiasedIncomplete(s) => s.block_split(),
        }
    }

    fn evaluate<K: KernelAccess + ?Sized>(&self, kernel: &K) -> f64 {
        match self {
            Self::BiasedFull(s) => s.evaluate(kernel),
            Self::UnbiasedFull(s) => s.evaluate(kernel),
            Self::UnbiasedIncomplete(s) => s.evaluate(kernel),
        }
    }
}

impl From<BiasedFull> for Statistic {
    fn from(s: BiasedFull) -> Self {
        Self::BiasedFull(s)
    }
}

impl From<UnbiasedFull> for Statistic {
    fn from(s: UnbiasedFull) -> Self {
        Self::UnbiasedFull(s)
    }
}

impl From<UnbiasedIncomplete> for Statistic {
    fn from(s: UnbiasedIncomplete) -> Self {
        Self::UnbiasedIncomplete(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kernel_core::test_data::{DenseFeatures, GaussianKernel};
    use kernel_core::Error;

    /// Kernel matrix over two tight, well separated 1-d clusters
    fn separated_clusters(n: usize, m: usize) -> Vec<f64> {
        let data = (0..n)
            .map(|i| i as f64 * 0.01)
            .chain((0..m).map(|j| 10.0 + j as f64 * 0.01))
            .collect();
        let feats = DenseFeatures::new(1, data).unwrap();
        GaussianKernel::new(2.0).unwrap().gram_matrix(&feats)
    }

    #[test]
    fn test_hand_computed_values() {
        // P = {0, 1}, Q = {2, 3} with K = I + 0.5 * (P×P and Q×Q off-diagonals)
        let gram = vec![
            1.0, 0.5, 0.0, 0.0, //
            0.5, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.5, //
            0.0, 0.0, 0.5, 1.0,
        ];
        let km = KernelMatrix::new(&gram, 4).unwrap();

        // (3 / 4) + (3 / 4) - 0
        assert_relative_eq!(BiasedFull::new(2, 2).unwrap().compute(&km).unwrap(), 1.5);
        // (1 / 2) + (1 / 2) - 0
        assert_relative_eq!(UnbiasedFull::new(2, 2).unwrap().compute(&km).unwrap(), 1.0);
        // pairs (0,1) and (1,0): 0.5 + 0.5 - 0 - 0 each, over 2
        assert_relative_eq!(UnbiasedIncomplete::new(2).unwrap().compute(&km).unwrap(), 1.0);
    }

    #[test]
    fn test_cross_terms_are_subtracted() {
        let gram = vec![
            1.0, 0.2, 0.4, //
            0.2, 1.0, 0.6, //
            0.4, 0.6, 1.0,
        ];
        let km = KernelMatrix::new(&gram, 3).unwrap();

        // P = {0, 1}, Q = {2}: pp = 2.4 / 4, qq = 1, pq = 1.0 / 2
        let biased = BiasedFull::new(2, 1).unwrap().compute(&km).unwrap();
        assert_relative_eq!(biased, 0.6 + 1.0 - 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_separated_clusters_are_positive() {
        let gram = separated_clusters(10, 10);
        let km = KernelMatrix::new(&gram, 20).unwrap();

        for statistic_type in StatisticType::ALL {
            let statistic = Statistic::new(statistic_type, BlockSplit::new(10, 10)).unwrap();
            let value = statistic.compute(&km).unwrap();
            assert!(value > 1.5, "{statistic_type} gave {value}");
        }
    }

    #[test]
    fn test_identical_blocks_unbiased_is_zero() {
        // Q is an exact copy of P, so all blocks coincide
        let data: Vec<f64> = (0..6).map(|i| i as f64 * 0.3).collect();
        let pooled = data.iter().chain(data.iter()).copied().collect();
        let feats = DenseFeatures::new(1, pooled).unwrap();
        let gram = GaussianKernel::new(1.0).unwrap().gram_matrix(&feats);
        let km = KernelMatrix::new(&gram, 12).unwrap();

        let unbiased = UnbiasedIncomplete::new(6).unwrap().compute(&km).unwrap();
        assert!(unbiased.abs() < 1e-12);
        let biased = BiasedFull::new(6, 6).unwrap().compute(&km).unwrap();
        assert!(biased.abs() < 1e-12);
    }

    #[test]
    fn test_statistic_enum_matches_variants() {
        let gram = separated_clusters(4, 4);
        let km = KernelMatrix::new(&gram, 8).unwrap();

        let direct = UnbiasedFull::new(4, 4).unwrap();
        let wrapped: Statistic = direct.into();
        assert_eq!(wrapped.statistic_type(), StatisticType::UnbiasedFull);
        assert_eq!(wrapped.block_split(), BlockSplit::new(4, 4));
        assert_eq!(direct.compute(&km).unwrap(), wrapped.compute(&km).unwrap());
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(UnbiasedIncomplete::new(1), Err(Error::Configuration(_))));
        assert!(matches!(
            Statistic::new(StatisticType::UnbiasedIncomplete, BlockSplit::new(10, 9)),
            Err(Error::Configuration(_))
        ));
        assert!(BiasedFull::new(1, 5).is_ok());
        assert!(matches!(UnbiasedFull::new(1, 5), Err(Error::Configuration(_))));
        assert!(matches!(BiasedFull::new(0, 5), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_shape_mismatch() {
        let gram = separated_clusters(3, 3);
        let km = KernelMatrix::new(&gram, 6).unwrap();

        let statistic = BiasedFull::new(3, 4).unwrap();
        assert!(matches!(
            statistic.compute(&km),
            Err(Error::ShapeMismatch { expected: 7, .. })
        ));
    }
}
