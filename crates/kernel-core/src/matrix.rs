//! Read-only kernel matrix views
//!
//! A kernel (Gram) matrix over `n + m` pooled samples is borrowed, never
//! copied. Statistics read it through [`KernelAccess`], which is implemented
//! both by the plain [`KernelMatrix`] view and by [`PermutedKernel`], a gather
//! view that routes every access through a permutation index array.

use crate::{Error, Result};

/// Element access into a square kernel matrix
pub trait KernelAccess {
    /// Number of rows (and columns)
    fn size(&self) -> usize;

    /// Kernel value at row `i`, column `j`
    fn get(&self, i: usize, j: usize) -> f64;
}

/// Borrowed view of a square, row-major kernel matrix
#[derive(Debug, Clone, Copy)]
pub struct KernelMatrix<'a> {
    data: &'a [f64],
    size: usize,
}

impl<'a> KernelMatrix<'a> {
    /// Wrap a row-major buffer of `size * size` values
    pub fn new(data: &'a [f64], size: usize) -> Result<Self> {
        let expected = size
            .checked_mul(size)
            .ok_or_else(|| Error::InvalidInput(format!("kernel matrix size {size} overflows")))?;
        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "buffer of length {} cannot hold a {size}x{size} kernel matrix",
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Wrap a row-major buffer whose length is a perfect square
    pub fn from_square(data: &'a [f64]) -> Result<Self> {
        let size = (data.len() as f64).sqrt().round() as usize;
        if size * size != data.len() {
            return Err(Error::InvalidInput(format!(
                "buffer of length {} is not a square matrix",
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Underlying row-major buffer
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Row `i` of the matrix
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Kernel value at row `i`, column `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.size && j < self.size, "index ({i}, {j}) out of bounds");
        self.data[i * self.size + j]
    }

    /// Check `K[i,j] == K[j,i]` within an absolute tolerance
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }

    /// Fail with a shape mismatch unless the matrix is `expected x expected`
    pub fn ensure_size(&self, expected: usize) -> Result<()> {
        if self.size != expected {
            return Err(Error::shape_mismatch(expected, self.size, self.size));
        }
        Ok(())
    }

    /// Gather view of this matrix under `permutation`
    pub fn permuted<'p>(&self, permutation: &'p [usize]) -> Result<PermutedKernel<'a, 'p>> {
        PermutedKernel::try_new(*self, permutation)
    }
}

impl KernelAccess for KernelMatrix<'_> {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        KernelMatrix::get(self, i, j)
    }
}

/// Permuted view `K'[i,j] = K[π[i], π[j]]` over a borrowed kernel matrix
///
/// Nothing is materialized: each access costs one extra index lookup per
/// axis instead of a full `(n+m)^2` copy per permutation.
#[derive(Debug, Clone, Copy)]
pub struct PermutedKernel<'a, 'p> {
    matrix: KernelMatrix<'a>,
    permutation: &'p [usize],
}

impl<'a, 'p> PermutedKernel<'a, 'p> {
    /// Create a view without validating the permutation
    ///
    /// The caller guarantees `permutation` is a bijection on `0..matrix.size()`.
    pub fn new(matrix: KernelMatrix<'a>, permutation: &'p [usize]) -> Self {
        debug_assert_eq!(matrix.size(), permutation.len());
        Self { matrix, permutation }
    }

    /// Create a view, checking that `permutation` is a bijection on `0..matrix.size()`
    pub fn try_new(matrix: KernelMatrix<'a>, permutation: &'p [usize]) -> Result<Self> {
        if permutation.len() != matrix.size() {
            return Err(Error::InvalidInput(format!(
                "permutation of length {} does not match kernel matrix size {}",
                permutation.len(),
                matrix.size()
            )));
        }
        let mut seen = vec![false; permutation.len()];
        for &idx in permutation {
            if idx >= seen.len() || seen[idx] {
                return Err(Error::InvalidInput(format!(
                    "index {idx} is out of range or repeated in permutation"
                )));
            }
            seen[idx] = true;
        }
        Ok(Self { matrix, permutation })
    }

    /// The permutation routing every access
    pub fn permutation(&self) -> &'p [usize] {
        self.permutation
    }
}

impl KernelAccess for PermutedKernel<'_, '_> {
    #[inline]
    fn size(&self) -> usize {
        self.permutation.len()
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(self.permutation[i], self.permutation[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Vec<f64> {
        vec![
            1.0, 0.5, 0.2, //
            0.5, 1.0, 0.7, //
            0.2, 0.7, 1.0,
        ]
    }

    #[test]
    fn test_construction_validates_length() {
        let data = sample_matrix();
        assert!(KernelMatrix::new(&data, 3).is_ok());
        assert!(matches!(
            KernelMatrix::new(&data, 2),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            KernelMatrix::from_square(&data[..8]),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(KernelMatrix::from_square(&data).unwrap().size(), 3);
    }

    #[test]
    fn test_access_and_rows() {
        let data = sample_matrix();
        let km = KernelMatrix::new(&data, 3).unwrap();
        assert_eq!(km.get(0, 2), 0.2);
        assert_eq!(km.row(1), &[0.5, 1.0, 0.7]);
        assert!(km.is_symmetric(0.0));

        let mut skewed = data.clone();
        skewed[1] = 0.6;
        assert!(!KernelMatrix::new(&skewed, 3).unwrap().is_symmetric(1e-12));
    }

    #[test]
    fn test_ensure_size() {
        let data = sample_matrix();
        let km = KernelMatrix::new(&data, 3).unwrap();
        assert!(km.ensure_size(3).is_ok());
        match km.ensure_size(4) {
            Err(Error::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, "3x3");
            }
            other => panic!("Wrong result: {other:?}"),
        }
    }

    #[test]
    fn test_permuted_view_gathers() {
        let data = sample_matrix();
        let km = KernelMatrix::new(&data, 3).unwrap();
        let perm = [2, 0, 1];
        let view = km.permuted(&perm).unwrap();

        assert_eq!(view.size(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(view.get(i, j), km.get(perm[i], perm[j]));
            }
        }
        assert_eq!(view.get(0, 1), 0.2);
        assert_eq!(view.permutation(), &perm);
    }

    #[test]
    fn test_permuted_view_rejects_non_bijection() {
        let data = sample_matrix();
        let km = KernelMatrix::new(&data, 3).unwrap();
        assert!(km.permuted(&[0, 1]).is_err());
        assert!(km.permuted(&[0, 1, 1]).is_err());
        assert!(km.permuted(&[0, 1, 3]).is_err());
    }
}
