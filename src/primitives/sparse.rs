//! Sparse vector type for TF-IDF features.

use serde::{Deserialize, Serialize};

/// A sparse vector of `f64` values with strictly increasing indices.
///
/// # Examples
///
/// ```
/// use veracity::primitives::SparseVector;
///
/// let v = SparseVector::from_pairs(5, vec![(3, 4.0), (0, 3.0)]).expect("indices in range");
/// assert_eq!(v.dim(), 5);
/// assert_eq!(v.nnz(), 2);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Creates the zero vector of the given dimension.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a vector from `(index, value)` pairs in any order.
    ///
    /// Duplicate indices are summed and explicit zeros are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is `>= dim`.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Result<Self, &'static str> {
        if pairs.iter().any(|&(i, _)| i >= dim) {
            return Err("Sparse index out of bounds");
        }
        pairs.sort_by_key(|&(i, _)| i);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            if indices.last() == Some(&i) {
                if let Some(last) = values.last_mut() {
                    *last += v;
                }
            } else {
                indices.push(i);
                values.push(v);
            }
        }

        let mut out = Self {
            dim,
            indices,
            values,
        };
        out.prune_zeros();
        Ok(out)
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|&v| v != 0.0) {
            return;
        }
        let (indices, values) = self
            .indices
            .iter()
            .zip(&self.values)
            .filter(|&(_, &v)| v != 0.0)
            .map(|(&i, &v)| (i, v))
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    /// Dimension of the vector.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// True when no entry is non-zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Stored indices, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, aligned with [`SparseVector::indices`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `index`, zero when absent.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map_or(0.0, |pos| self.values[pos])
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scales to unit length; the zero vector is returned unchanged.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
        self
    }

    /// Dot product with another sparse vector (merge over sorted indices).
    #[must_use]
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    /// Dot product with a dense slice; indices beyond the slice count as zero.
    #[must_use]
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(i, v)| dense.get(i).map(|w| w * v))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(4, vec![(2, 1.0), (0, 2.0), (2, 3.0)]).expect("valid");
        assert_eq!(v.indices(), &[0, 2]);
        assert_eq!(v.values(), &[2.0, 4.0]);
    }

    #[test]
    fn test_from_pairs_rejects_out_of_bounds() {
        assert!(SparseVector::from_pairs(2, vec![(2, 1.0)]).is_err());
    }

    #[test]
    fn test_explicit_zeros_dropped() {
        let v = SparseVector::from_pairs(3, vec![(1, 0.0), (2, 1.0)]).expect("valid");
        assert_eq!(v.nnz(), 1);
        assert_eq!(v.get(1), 0.0);
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        let v = SparseVector::zeros(10).normalized();
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn test_normalized_unit_length() {
        let v = SparseVector::from_pairs(3, vec![(0, 3.0), (2, 4.0)])
            .expect("valid")
            .normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_dot_sparse_and_dense_agree() {
        let a = SparseVector::from_pairs(5, vec![(0, 1.0), (3, 2.0)]).expect("valid");
        let b = SparseVector::from_pairs(5, vec![(3, 5.0), (4, 7.0)]).expect("valid");
        assert!((a.dot(&b) - 10.0).abs() < 1e-12);
        let dense = [0.0, 0.0, 0.0, 5.0, 7.0];
        assert!((a.dot_dense(&dense) - 10.0).abs() < 1e-12);
    }
}
