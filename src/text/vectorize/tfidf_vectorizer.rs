use super::{SparseVector, StopWordsFilter};
use crate::config::VectorizerConfig;
use crate::error::{Result, VeracityError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// TF-IDF vectorizer that learns a vocabulary from normalized documents.
///
/// **TF-IDF formula (smoothed):**
/// ```text
/// tfidf(t, d) = tf(t, d) × idf(t)
/// tf(t, d)    = count of term t in document d
/// idf(t)      = ln((1 + N) / (1 + df(t))) + 1
/// ```
/// Each document vector is then L2-normalized.
///
/// # Examples
///
/// ```
/// use veracity::text::vectorize::TfidfVectorizer;
///
/// let docs = ["secret alien base", "alien invasion imminent"];
/// let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");
/// assert_eq!(state.vocabulary_size(), 5);
///
/// let vectors = state.transform(&["alien base"]);
/// assert!((vectors[0].norm() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    stop_words: &'static StopWordsFilter,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Create a vectorizer with the default vocabulary cap (5000).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&VectorizerConfig::default())
    }

    /// Create a vectorizer from configuration.
    #[must_use]
    pub fn from_config(config: &VectorizerConfig) -> Self {
        Self {
            max_features: config.max_features,
            stop_words: StopWordsFilter::english_extended(),
        }
    }

    /// Set maximum vocabulary size.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Learn vocabulary and IDF weights from normalized documents.
    ///
    /// Vocabulary terms are the `max_features` most frequent tokens over the
    /// whole corpus, ties broken lexicographically, stop words excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus is empty, `max_features` is zero, or
    /// no token survives filtering.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<VectorizerState> {
        if documents.is_empty() {
            return Err(VeracityError::InvalidInput(
                "Cannot fit vectorizer on empty corpus".to_string(),
            ));
        }
        if self.max_features == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "max_features",
                0,
                "> 0",
            ));
        }

        let n_docs = documents.len();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in doc.as_ref().split_whitespace() {
                if self.stop_words.is_stop_word(token) {
                    continue;
                }
                *term_freq.entry(token).or_insert(0) += 1;
                if seen.insert(token) {
                    *doc_freq.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_freq.is_empty() {
            return Err(VeracityError::InvalidInput(
                "Corpus produced an empty vocabulary".to_string(),
            ));
        }

        // Sort by frequency and limit vocabulary size
        let mut sorted_words: Vec<(&str, usize)> = term_freq.into_iter().collect();
        sorted_words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted_words.truncate(self.max_features);

        let n = n_docs as f64;
        let (vocabulary, idf): (Vec<String>, Vec<f64>) = sorted_words
            .into_iter()
            .map(|(word, _)| {
                let df = doc_freq.get(word).copied().unwrap_or(0) as f64;
                (word.to_string(), ((1.0 + n) / (1.0 + df)).ln() + 1.0)
            })
            .unzip();

        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, word)| (word.clone(), i))
            .collect();

        Ok(VectorizerState {
            vocabulary,
            idf,
            index,
            n_documents: n_docs,
            max_features: self.max_features,
        })
    }
}

/// Frozen vocabulary and IDF weights produced by [`TfidfVectorizer::fit`].
///
/// Immutable after fitting; `transform` is pure and safe to call from many
/// threads at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerState {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    index: BTreeMap<String, usize>,
    n_documents: usize,
    max_features: usize,
}

impl VectorizerState {
    /// Transform normalized documents into L2-normalized TF-IDF vectors.
    ///
    /// Tokens outside the vocabulary contribute nothing; a document with no
    /// vocabulary token maps to the zero vector.
    #[must_use]
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }

    /// Transform a single normalized document.
    #[must_use]
    pub fn transform_one(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in document.split_whitespace() {
            if let Some(&idx) = self.index.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        SparseVector::from_pairs(self.vocabulary.len(), pairs)
            .map(SparseVector::normalized)
            .unwrap_or_else(|_| SparseVector::zeros(self.vocabulary.len()))
    }

    /// Vocabulary index of `token`.
    #[must_use]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// IDF weight of the term at `index`.
    #[must_use]
    pub fn idf_at(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    /// IDF weights in vocabulary order.
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Vocabulary terms in index order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of vocabulary terms.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Documents seen during fitting.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Vocabulary cap the state was fitted with.
    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }
}
