//! Veracity: explainable fabricated-news detection in pure Rust.
//!
//! A strict pipeline of pure functions over frozen learned state:
//!
//! ```text
//! raw text -> normalize -> TF-IDF vectorize -> logistic regression -> (p_fabricated, p_authentic)
//! ```
//!
//! Every verdict can be inspected through global feature importance,
//! token-level Shapley attribution, a rule-based linguistic audit, and
//! retrieval of similar reference articles.
//!
//! # Quick Start
//!
//! ```
//! use veracity::prelude::*;
//!
//! // Train on the built-in synthetic corpus
//! let outcome = Trainer::new().train(&Corpus::sample()).unwrap();
//! assert!(outcome.metrics.accuracy > 0.9);
//!
//! // Classify
//! let detector = Detector::from_pipeline(outcome.pipeline);
//! let (p_fabricated, p_authentic) = detector
//!     .predict("Researchers developed a new solar cell, official statistics show")
//!     .unwrap();
//! assert!(p_authentic > p_fabricated);
//!
//! // Audit style without the model
//! let audit = detector.get_linguistic_audit("BREAKING!!! Aliens ARE here???").unwrap();
//! assert_eq!(audit.assessment, Assessment::HighlySuspicious);
//! ```
//!
//! # Modules
//!
//! - [`text`]: normalization, stop words, lemmatization, TF-IDF, similarity
//! - [`primitives`]: sparse feature vectors
//! - [`classification`]: class-balanced logistic regression
//! - [`metrics`]: accuracy, ROC-AUC, classification report, confusion matrix
//! - [`model_selection`]: seeded shuffles and train/test splitting
//! - [`corpus`]: labeled articles and CSV loading
//! - [`training`]: the training orchestrator
//! - [`pipeline`]: the fitted vectorizer/classifier pair
//! - [`serialization`]: paired artifact persistence
//! - [`explain`]: forensic explanations
//! - [`scoring`]: independent suspicion signals
//! - [`detector`]: the user-facing facade
//! - [`config`]: runtime configuration

pub mod classification;
pub mod config;
pub mod corpus;
pub mod detector;
pub mod error;
pub mod explain;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod prelude;
pub mod primitives;
pub mod scoring;
pub mod serialization;
pub mod text;
pub mod training;

pub use detector::Detector;
pub use error::{Result, VeracityError};
pub use pipeline::FittedPipeline;
pub use primitives::SparseVector;
