//! Text vectorization.
//!
//! [`TfidfVectorizer`] learns a frozen [`VectorizerState`] from normalized
//! documents; the state turns any normalized text into a fixed-length,
//! L2-normalized [`SparseVector`].

use crate::primitives::SparseVector;
use crate::text::stopwords::StopWordsFilter;

mod tfidf_vectorizer;

pub use tfidf_vectorizer::{TfidfVectorizer, VectorizerState};

#[cfg(test)]
mod tests;
