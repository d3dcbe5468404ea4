//! Test data for kernel statistic testing
//!
//! Kernel evaluation and feature management live upstream of this toolkit.
//! These minimal stand-ins exist so tests can check the permutation shortcut
//! against recomputing a kernel matrix from reshuffled samples.

use crate::{Error, Result};

/// Dense feature vectors stored column-major (`dim` values per sample)
#[derive(Debug, Clone, PartialEq)]
pub struct DenseFeatures {
    dim: usize,
    data: Vec<f64>,
}

impl DenseFeatures {
    /// Wrap `data` holding `data.len() / dim` samples of dimension `dim`
    pub fn new(dim: usize, data: Vec<f64>) -> Result<Self> {
        if dim == 0 || data.len() % dim != 0 {
            return Err(Error::InvalidInput(format!(
                "{} values cannot be split into samples of dimension {dim}",
                data.len()
            )));
        }
        Ok(Self { dim, data })
    }

    /// `count` samples filled column-major with `start, start + 1, ...`, each divided by `divisor`
    pub fn sequential(dim: usize, count: usize, start: f64, divisor: f64) -> Result<Self> {
        let data = (0..dim * count)
            .map(|k| (start + k as f64) / divisor)
            .collect();
        Self::new(dim, data)
    }

    /// Dimension of each sample
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Feature vector of sample `i`
    pub fn sample(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Samples of `self` followed by samples of `other`
    pub fn merge(&self, other: &DenseFeatures) -> Result<Self> {
        if self.dim != other.dim {
            return Err(Error::InvalidInput(format!(
                "cannot merge features of dimension {} and {}",
                self.dim, other.dim
            )));
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Self { dim: self.dim, data })
    }

    /// Samples reordered so that position `k` holds sample `indices[k]`
    pub fn subset(&self, indices: &[usize]) -> Self {
        let data = indices
            .iter()
            .flat_map(|&i| self.sample(i).iter().copied())
            .collect();
        Self {
            dim: self.dim,
            data,
        }
    }
}

/// Gaussian kernel `k(x, y) = exp(-||x - y||^2 / width)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    width: f64,
}

impl GaussianKernel {
    /// Create a kernel with the given positive width
    pub fn new(width: f64) -> Result<Self> {
        if !(width > 0.0 && width.is_finite()) {
            return Err(Error::configuration(format!(
                "kernel width must be positive and finite, got {width}"
            )));
        }
        Ok(Self { width })
    }

    /// Kernel width
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Evaluate the kernel on two feature vectors
    pub fn evaluate(&self, x: &[f64], y: &[f64]) -> f64 {
        let sq_dist: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(&a, &b)| (a - b) * (a - b))
            .sum();
        (-sq_dist / self.width).exp()
    }

    /// Row-major Gram matrix over all samples of `features`
    pub fn gram_matrix(&self, features: &DenseFeatures) -> Vec<f64> {
        let count = features.num_samples();
        let mut gram = vec![0.0; count * count];
        for i in 0..count {
            for j in 0..count {
                gram[i * count + j] = self.evaluate(features.sample(i), features.sample(j));
            }
        }
        gram
    }
}
