//! Forensic explanation of verdicts.
//!
//! [`ForensicExplainer`] wraps a shared, frozen [`FittedPipeline`] and
//! offers four views of a prediction:
//!
//! - **global importance**: the vocabulary terms with the most extreme
//!   classifier weights
//! - **local attribution**: Monte Carlo Shapley values over the tokens of
//!   one input
//! - **linguistic audit**: rule-based style signals over the raw text,
//!   independent of the model
//! - **similarity retrieval**: the reference articles closest to the input
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use veracity::corpus::Corpus;
//! use veracity::explain::ForensicExplainer;
//! use veracity::training::Trainer;
//!
//! let outcome = Trainer::new().train(&Corpus::sample()).unwrap();
//! let explainer = ForensicExplainer::new(Arc::new(outcome.pipeline));
//!
//! let importance = explainer.global_importance();
//! assert!(importance.anomaly_triggers[0].1 < 0.0);
//! ```

mod attribution;
mod audit;
mod global;
mod retrieval;

pub use attribution::{Attribution, LocalAttribution, TokenAttributor, TokenContribution};
pub use audit::{
    Assessment, AuditFlag, AuditReport, AuditScores, LinguisticAuditor, BENCHMARK_MESSAGE,
};
pub use global::{global_importance, GlobalImportance};
pub use retrieval::{related_documents, RelatedDocument};

use crate::config::{RetrievalConfig, VeracityConfig};
use crate::corpus::Corpus;
use crate::error::Result;
use crate::pipeline::FittedPipeline;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Explanation facade over one fitted pipeline.
#[derive(Debug, Clone)]
pub struct ForensicExplainer {
    pipeline: Arc<FittedPipeline>,
    attributor: TokenAttributor,
    auditor: LinguisticAuditor,
    retrieval: RetrievalConfig,
    importance_top_k: usize,
}

impl ForensicExplainer {
    /// Explainer with default settings.
    #[must_use]
    pub fn new(pipeline: Arc<FittedPipeline>) -> Self {
        Self::from_config(pipeline, &VeracityConfig::default())
    }

    /// Explainer using the explanation sections of `config`.
    #[must_use]
    pub fn from_config(pipeline: Arc<FittedPipeline>, config: &VeracityConfig) -> Self {
        Self {
            pipeline,
            attributor: TokenAttributor::from_config(config.attribution),
            auditor: LinguisticAuditor::with_thresholds(config.audit),
            retrieval: config.retrieval,
            importance_top_k: config.importance_top_k,
        }
    }

    /// Replaces the attributor.
    #[must_use]
    pub fn with_attributor(mut self, attributor: TokenAttributor) -> Self {
        self.attributor = attributor;
        self
    }

    /// The explained pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &Arc<FittedPipeline> {
        &self.pipeline
    }

    /// Top authentic markers and anomaly triggers.
    #[must_use]
    pub fn global_importance(&self) -> GlobalImportance {
        global_importance(&self.pipeline, self.importance_top_k)
    }

    /// Attribute each text independently; results keep input order.
    #[must_use]
    pub fn local_explanation<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<LocalAttribution> {
        let results: Vec<LocalAttribution> = texts
            .par_iter()
            .map(|text| self.attributor.explain(&self.pipeline, text.as_ref()))
            .collect();
        for (i, result) in results.iter().enumerate() {
            if let LocalAttribution::Unavailable { reason } = result {
                debug!(input = i, %reason, "Attribution unavailable");
            }
        }
        results
    }

    /// Linguistic audit of raw text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::VeracityError::EmptyInput`] for blank text.
    pub fn linguistic_audit(&self, text: &str) -> Result<AuditReport> {
        self.auditor.audit(text)
    }

    /// Reference articles from `corpus` most similar to `text`.
    #[must_use]
    pub fn related_intel(&self, text: &str, corpus: &Corpus) -> Vec<RelatedDocument> {
        related_documents(&self.pipeline, corpus, text, &self.retrieval)
    }
}
