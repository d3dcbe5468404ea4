//! Shared utilities for integration tests

use kernel_core::test_data::{DenseFeatures, GaussianKernel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub const DIM: usize = 2;
pub const GAUSSIAN_WIDTH: f64 = 2.0;
pub const SEED: u64 = 12345;
pub const TOLERANCE: f64 = 1e-14;

/// Pooled features of the reference scenario
///
/// P holds `n` samples filled column-major with `1, 2, ...` divided by `n`;
/// Q holds `m` samples filled with `n + 1, n + 2, ...` divided by `2m`.
pub fn scenario_features(n: usize, m: usize) -> DenseFeatures {
    let p = DenseFeatures::sequential(DIM, n, 1.0, n as f64).unwrap();
    let q = DenseFeatures::sequential(DIM, m, (n + 1) as f64, (2 * m) as f64).unwrap();
    p.merge(&q).unwrap()
}

/// Two tight Gaussian clusters, P around the origin and Q around `(separation, separation)`
pub fn clustered_features(n: usize, m: usize, separation: f64, seed: u64) -> DenseFeatures {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.1).unwrap();

    let mut data = Vec::with_capacity(DIM * (n + m));
    for sample in 0..n + m {
        let center = if sample < n { 0.0 } else { separation };
        for _ in 0..DIM {
            data.push(center + noise.sample(&mut rng));
        }
    }
    DenseFeatures::new(DIM, data).unwrap()
}

pub fn gaussian_kernel() -> GaussianKernel {
    GaussianKernel::new(GAUSSIAN_WIDTH).unwrap()
}

/// Assert two sequences agree entry by entry within `tolerance`
pub fn assert_sequences_close(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(actual.len(), expected.len(), "{context}: length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "{context}: trial {i} differs, got {a}, expected {e} (diff {:e})",
            (a - e).abs()
        );
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
