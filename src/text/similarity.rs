//! Document similarity over TF-IDF vectors.
//!
//! # Quick Start
//!
//! ```
//! use veracity::primitives::SparseVector;
//! use veracity::text::similarity::cosine_similarity;
//!
//! let v1 = SparseVector::from_pairs(3, vec![(0, 1.0), (1, 2.0), (2, 3.0)]).expect("valid");
//! let v2 = SparseVector::from_pairs(3, vec![(0, 2.0), (1, 3.0), (2, 4.0)]).expect("valid");
//!
//! let similarity = cosine_similarity(&v1, &v2).expect("cosine similarity should succeed");
//! assert!(similarity > 0.9);
//! ```

use crate::error::{Result, VeracityError};
use crate::primitives::SparseVector;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Compute cosine similarity between two vectors.
///
/// # Formula
/// ```text
/// cosine_sim(A, B) = (A · B) / (||A|| * ||B||)
/// ```
///
/// A zero vector is orthogonal to everything and scores 0.
///
/// # Errors
///
/// Returns an error if the vectors have different dimensions.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> Result<f64> {
    if a.dim() != b.dim() {
        return Err(VeracityError::InvalidInput(format!(
            "Vectors must have same dimension: {} vs {}",
            a.dim(),
            b.dim()
        )));
    }

    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(a.dot(b) / (norm_a * norm_b))
}

/// Find the `k` documents most similar to `query` scoring at least
/// `min_similarity`.
///
/// Returns `(index, similarity)` pairs, highest similarity first; equal
/// scores keep ascending document index. Documents of a different dimension
/// score 0.
///
/// # Examples
///
/// ```
/// use veracity::primitives::SparseVector;
/// use veracity::text::similarity::top_k_similar;
///
/// let v = |pairs: Vec<(usize, f64)>| SparseVector::from_pairs(3, pairs).expect("valid");
/// let query = v(vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
/// let docs = vec![
///     v(vec![(0, 2.0), (1, 3.0), (2, 4.0)]),
///     v(vec![(2, 1.0)]),
///     v(vec![(0, 1.0), (1, 2.0), (2, 2.9)]),
/// ];
///
/// let top = top_k_similar(&query, &docs, 2, 0.0);
/// assert_eq!(top.len(), 2);
/// assert_eq!(top[0].0, 2);
/// ```
#[must_use]
pub fn top_k_similar(
    query: &SparseVector,
    documents: &[SparseVector],
    k: usize,
    min_similarity: f64,
) -> Vec<(usize, f64)> {
    if documents.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut similarities: Vec<(usize, f64)> = documents
        .par_iter()
        .enumerate()
        .map(|(idx, doc)| (idx, cosine_similarity(query, doc).unwrap_or(0.0)))
        .filter(|&(_, sim)| sim >= min_similarity)
        .collect();

    similarities.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    similarities.truncate(k);

    similarities
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;
