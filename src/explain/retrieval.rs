//! Retrieval of reference articles similar to a query.

use crate::config::RetrievalConfig;
use crate::corpus::{Corpus, Document, Label};
use crate::model_selection::sample_indices;
use crate::pipeline::FittedPipeline;
use crate::primitives::SparseVector;
use crate::text::similarity::top_k_similar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A reference article matching a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedDocument {
    /// Trimmed headline
    pub title: String,
    /// Leading body text followed by `...`
    pub excerpt: String,
    /// Cosine similarity in `[0, 1]`
    pub similarity: f64,
    /// Similarity as `"{:.1}%"`
    pub similarity_pct: String,
    /// Ground-truth label of the reference article
    pub label: Label,
    /// `Verified` for authentic references, `Flagged` for fabricated ones
    pub status: String,
}

impl RelatedDocument {
    fn from_match(doc: &Document, similarity: f64, excerpt_chars: usize) -> Self {
        let body = doc.body.trim();
        let mut excerpt: String = body.chars().take(excerpt_chars).collect();
        excerpt.push_str("...");
        Self {
            title: doc.title.trim().to_string(),
            excerpt,
            similarity,
            similarity_pct: format!("{:.1}%", similarity * 100.0),
            label: doc.label,
            status: doc.label.status().to_string(),
        }
    }
}

/// Find up to `top_k` reference articles most similar to `query`.
///
/// At most `sample_size` articles are drawn from `corpus` with a fixed
/// seed, vectorized with the fitted vectorizer, and compared by cosine
/// similarity. Matches below `min_similarity` are dropped. A query with no
/// known vocabulary yields no matches.
#[must_use]
pub fn related_documents(
    pipeline: &FittedPipeline,
    corpus: &Corpus,
    query: &str,
    config: &RetrievalConfig,
) -> Vec<RelatedDocument> {
    let query_vec = pipeline.featurize(query);
    if query_vec.is_zero() || corpus.is_empty() || config.top_k == 0 {
        return Vec::new();
    }

    let documents = corpus.documents();
    let sampled = sample_indices(documents.len(), config.sample_size, config.seed);
    let vectors: Vec<SparseVector> = sampled
        .par_iter()
        .map(|&i| pipeline.featurize(&documents[i].total_text()))
        .collect();

    top_k_similar(&query_vec, &vectors, config.top_k, config.min_similarity)
        .into_iter()
        .map(|(pos, similarity)| {
            RelatedDocument::from_match(&documents[sampled[pos]], similarity, config.excerpt_chars)
        })
        .collect()
}
