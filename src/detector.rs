//! The `Detector` facade: verdicts plus forensic explanations.
//!
//! A detector is either online (holding a loaded [`FittedPipeline`]) or
//! offline. Offline detectors still run the linguistic audit; every
//! model-backed operation reports [`VeracityError::ModelUnavailable`].
//!
//! # Example
//!
//! ```
//! use veracity::corpus::Corpus;
//! use veracity::detector::Detector;
//! use veracity::training::Trainer;
//!
//! let outcome = Trainer::new().train(&Corpus::sample()).unwrap();
//! let detector = Detector::from_pipeline(outcome.pipeline);
//!
//! let (p_fabricated, p_authentic) = detector
//!     .predict("Leaked document from a secret underground base claims aliens will invade")
//!     .unwrap();
//! assert!(p_fabricated > p_authentic);
//! ```

use crate::config::VeracityConfig;
use crate::corpus::Corpus;
use crate::error::{Result, VeracityError};
use crate::explain::{AuditReport, ForensicExplainer, LinguisticAuditor, LocalAttribution, RelatedDocument};
use crate::pipeline::FittedPipeline;
use crate::serialization::ArtifactStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Global importance tables: `(authentic_markers, anomaly_triggers)`.
pub type ImportanceTables = (Vec<(String, f64)>, Vec<(String, f64)>);

/// Classification and explanation facade.
#[derive(Debug, Clone)]
pub struct Detector {
    explainer: Option<ForensicExplainer>,
    auditor: LinguisticAuditor,
    config: VeracityConfig,
    offline_reason: String,
}

impl Detector {
    /// Detector over an in-memory pipeline with default settings.
    #[must_use]
    pub fn from_pipeline(pipeline: FittedPipeline) -> Self {
        Self::with_config(Some(Arc::new(pipeline)), VeracityConfig::default())
    }

    /// Detector over an optional shared pipeline.
    #[must_use]
    pub fn with_config(pipeline: Option<Arc<FittedPipeline>>, config: VeracityConfig) -> Self {
        Self {
            explainer: pipeline.map(|p| ForensicExplainer::from_config(p, &config)),
            auditor: LinguisticAuditor::with_thresholds(config.audit),
            offline_reason: "no model loaded".to_string(),
            config,
        }
    }

    /// A detector with no model; only the linguistic audit works.
    #[must_use]
    pub fn offline(config: VeracityConfig, reason: impl Into<String>) -> Self {
        let mut detector = Self::with_config(None, config);
        detector.offline_reason = reason.into();
        detector
    }

    /// Load the artifact pair from `dir` with default settings.
    ///
    /// # Errors
    ///
    /// See [`Detector::load_with_config`].
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let config = VeracityConfig::default().with_artifacts_dir(dir.as_ref());
        Self::load_with_config(config)
    }

    /// Load the artifact pair from `config.artifacts_dir`.
    ///
    /// Missing artifacts yield an offline detector and a warning.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::ArtifactMismatch`] or
    /// [`VeracityError::CorruptArtifact`] when artifacts exist but cannot be
    /// trusted, and I/O errors from reading them.
    pub fn load_with_config(config: VeracityConfig) -> Result<Self> {
        let store = ArtifactStore::new(&config.artifacts_dir);
        match store.load() {
            Ok(pipeline) => {
                info!(
                    dir = %store.dir().display(),
                    pair_id = pipeline.pair_id(),
                    features = pipeline.vectorizer().vocabulary_size(),
                    "Detector online"
                );
                Ok(Self::with_config(Some(Arc::new(pipeline)), config))
            }
            Err(VeracityError::ModelUnavailable { reason }) => {
                warn!(dir = %store.dir().display(), %reason, "Detector offline");
                Ok(Self::offline(config, reason))
            }
            Err(err) => Err(err),
        }
    }

    /// Whether a model is loaded.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.explainer.is_some()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &VeracityConfig {
        &self.config
    }

    /// The loaded pipeline, if any.
    #[must_use]
    pub fn pipeline(&self) -> Option<&Arc<FittedPipeline>> {
        self.explainer.as_ref().map(ForensicExplainer::pipeline)
    }

    fn explainer(&self) -> Result<&ForensicExplainer> {
        self.explainer
            .as_ref()
            .ok_or_else(|| VeracityError::ModelUnavailable {
                reason: self.offline_reason.clone(),
            })
    }

    /// `(p_fabricated, p_authentic)` for `text`.
    ///
    /// # Errors
    ///
    /// - [`VeracityError::InputTooShort`] when `text` has fewer than
    ///   `min_words` words; checked before anything else
    /// - [`VeracityError::ModelUnavailable`] when offline
    pub fn predict(&self, text: &str) -> Result<(f64, f64)> {
        let words = text.split_whitespace().count();
        if words < self.config.min_words {
            return Err(VeracityError::InputTooShort {
                words,
                min_words: self.config.min_words,
            });
        }
        Ok(self.explainer()?.pipeline().predict_proba(text))
    }

    /// Token attributions for each text, in input order.
    ///
    /// Never fails: when offline every entry is
    /// [`LocalAttribution::Unavailable`].
    #[must_use]
    pub fn get_local_explanation<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<LocalAttribution> {
        match &self.explainer {
            Some(explainer) => explainer.local_explanation(texts),
            None => texts
                .iter()
                .map(|_| LocalAttribution::Unavailable {
                    reason: format!("model unavailable: {}", self.offline_reason),
                })
                .collect(),
        }
    }

    /// Linguistic audit; works offline.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::EmptyInput`] for blank text.
    pub fn get_linguistic_audit(&self, text: &str) -> Result<AuditReport> {
        self.auditor.audit(text)
    }

    /// Top authentic markers and anomaly triggers.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::ModelUnavailable`] when offline.
    pub fn get_global_importance(&self) -> Result<ImportanceTables> {
        let importance = self.explainer()?.global_importance();
        Ok((importance.authentic_markers, importance.anomaly_triggers))
    }

    /// Reference articles from `corpus` most similar to `text`.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::ModelUnavailable`] when offline.
    pub fn get_related_intel(&self, text: &str, corpus: &Corpus) -> Result<Vec<RelatedDocument>> {
        Ok(self.explainer()?.related_intel(text, corpus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::Assessment;
    use crate::training::{sample_pipeline, Trainer};
    use std::fs;

    fn online() -> Detector {
        Detector::with_config(Some(sample_pipeline()), VeracityConfig::default())
    }

    #[test]
    fn test_predict_probabilities_sum_to_one() {
        let (p0, p1) = online()
            .predict("Official statistics show solar energy growth exceeded analyst predictions")
            .expect("predicts");
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!(p1 > p0);
    }

    #[test]
    fn test_short_input_checked_before_model() {
        let offline = Detector::offline(VeracityConfig::default(), "test");
        assert!(matches!(
            offline.predict("too short"),
            Err(VeracityError::InputTooShort { words: 2, .. })
        ));
        assert!(matches!(
            online().predict(""),
            Err(VeracityError::InputTooShort { words: 0, .. })
        ));
    }

    #[test]
    fn test_offline_detector() {
        let detector = Detector::offline(VeracityConfig::default(), "no artifacts");
        assert!(!detector.is_online());
        assert!(matches!(
            detector.predict("one two three four five six"),
            Err(VeracityError::ModelUnavailable { reason }) if reason == "no artifacts"
        ));
        assert!(detector.get_global_importance().is_err());
        assert!(detector
            .get_related_intel("alien invasion", &Corpus::sample())
            .is_err());

        let local = detector.get_local_explanation(&["anything at all"]);
        assert_eq!(local.len(), 1);
        assert!(!local[0].is_attributed());

        let audit = detector
            .get_linguistic_audit("BREAKING!!! Aliens ARE here???")
            .expect("audit works offline");
        assert_eq!(audit.assessment, Assessment::HighlySuspicious);
    }

    #[test]
    fn test_load_missing_dir_is_offline() {
        let dir = tempfile::tempdir().expect("temp dir");
        let detector = Detector::load(dir.path().join("absent")).expect("offline, not error");
        assert!(!detector.is_online());
    }

    #[test]
    fn test_load_saved_pair() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ArtifactStore::new(dir.path());
        let outcome = Trainer::new()
            .train_and_save(&Corpus::sample(), &store)
            .expect("trains");

        let detector = Detector::load(dir.path()).expect("loads");
        assert!(detector.is_online());
        assert_eq!(
            detector.pipeline().map(|p| p.pair_id().to_string()),
            Some(outcome.pipeline.pair_id().to_string())
        );
    }

    #[test]
    fn test_load_corrupt_pair_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ArtifactStore::new(dir.path());
        store.save(&sample_pipeline()).expect("saves");
        fs::write(store.model_path(), b"garbage").expect("write");

        assert!(matches!(
            Detector::load(dir.path()),
            Err(VeracityError::CorruptArtifact { .. })
        ));
    }

    #[test]
    fn test_global_importance_tables() {
        let (markers, triggers) = online().get_global_importance().expect("online");
        assert!(!markers.is_empty());
        assert!(!triggers.is_empty());
        assert!(markers[0].1 >= markers[markers.len() - 1].1);
        assert!(triggers[0].1 <= triggers[triggers.len() - 1].1);
    }

    #[test]
    fn test_related_intel_online() {
        let related = online()
            .get_related_intel(
                "Leaders signed a historic agreement to reduce carbon emissions",
                &Corpus::sample(),
            )
            .expect("online");
        assert_eq!(related[0].title, "Global Climate Accord Reached");
    }
}
