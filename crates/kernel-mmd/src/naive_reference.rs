//! Naive reference implementations of the permutation null distribution
//!
//! These implementations are intentionally slow. They serve as oracles for
//! verifying that the gather-based batch driver is exact.
//!
//! DO NOT USE IN PRODUCTION - these are for testing and debugging only!

use kernel_core::test_data::{DenseFeatures, GaussianKernel};
use kernel_core::{KernelMatrix, PermutationSource};
use kernel_mmd::{MmdStatistic, Statistic};
use nalgebra::DMatrix;

/// Permutation operator `P` with `P[π[i], i] = 1`
fn permutation_operator(permutation: &[usize]) -> DMatrix<f64> {
    let size = permutation.len();
    let mut operator = DMatrix::zeros(size, size);
    for (i, &target) in permutation.iter().enumerate() {
        operator[(target, i)] = 1.0;
    }
    operator
}

/// Materialize `Pᵀ K P`, whose entry `(i, j)` is `K[π[i], π[j]]`, as a row-major buffer
pub fn explicitly_permuted(gram: &[f64], size: usize, permutation: &[usize]) -> Vec<f64> {
    let kernel = DMatrix::from_row_slice(size, size, gram);
    let operator = permutation_operator(permutation);
    let permuted = operator.transpose() * kernel * &operator;

    let mut row_major = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            row_major.push(permuted[(i, j)]);
        }
    }
    row_major
}

/// Null samples from explicitly permuted copies of the kernel matrix
///
/// This implementation:
/// - Builds a dense permutation operator for every trial
/// - Multiplies it through the full kernel matrix
/// - Evaluates the standalone statistic on the materialized copy
pub struct NaivePermutedMatrix;

impl NaivePermutedMatrix {
    pub fn null_samples(
        gram: &[f64],
        size: usize,
        statistic: &Statistic,
        num_null_samples: usize,
        seed: u64,
    ) -> Vec<f64> {
        let mut source = PermutationSource::new(seed);
        (0..num_null_samples)
            .map(|_| {
                let permutation = source.next_permutation(size);
                let permuted = explicitly_permuted(gram, size, &permutation);
                let km = KernelMatrix::new(&permuted, size).unwrap();
                statistic.compute(&km).unwrap()
            })
            .collect()
    }
}

/// Null samples from reshuffled features and freshly computed kernel matrices
///
/// This implementation never reuses a kernel value: every trial reorders the
/// pooled samples and evaluates the kernel from scratch.
pub struct NaiveRecomputedKernel;

impl NaiveRecomputedKernel {
    pub fn null_samples(
        features: &DenseFeatures,
        kernel: &GaussianKernel,
        statistic: &Statistic,
        num_null_samples: usize,
        seed: u64,
    ) -> Vec<f64> {
        let size = features.num_samples();
        let mut source = PermutationSource::new(seed);
        (0..num_null_samples)
            .map(|_| {
                let permutation = source.next_permutation(size);
                let shuffled = features.subset(&permutation);
                let gram = kernel.gram_matrix(&shuffled);
                let km = KernelMatrix::new(&gram, size).unwrap();
                statistic.compute(&km).unwrap()
            })
            .collect()
    }
}
