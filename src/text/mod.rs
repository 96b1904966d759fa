//! Text processing for news articles.
//!
//! - [`normalize`]: the deterministic cleaning transform shared by training
//!   and inference
//! - [`stopwords`]: compact and extended English stop-word lists
//! - [`lemmatize`]: noun lemmatization
//! - [`vectorize`]: TF-IDF features
//! - [`similarity`]: cosine similarity and top-k retrieval

pub mod lemmatize;
pub mod normalize;
pub mod similarity;
pub mod stopwords;
pub mod vectorize;

pub use normalize::{normalize, normalized_tokens, TextNormalizer};
