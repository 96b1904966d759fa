//! Runtime configuration.
//!
//! Every tunable constant of the pipeline lives here as a default. Sections
//! deserialize independently with `#[serde(default)]`, so a JSON file only
//! needs to name the values it overrides:
//!
//! ```
//! use veracity::config::VeracityConfig;
//!
//! let config: VeracityConfig =
//!     serde_json::from_str(r#"{ "retrieval": { "min_similarity": 0.1 } }"#).unwrap();
//! assert_eq!(config.retrieval.min_similarity, 0.1);
//! assert_eq!(config.retrieval.top_k, 5);
//! ```

use crate::error::{Result, VeracityError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`VeracityConfig::artifacts_dir`].
pub const ARTIFACTS_ENV: &str = "VERACITY_ARTIFACTS";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeracityConfig {
    /// Directory holding the vectorizer/model artifact pair
    pub artifacts_dir: PathBuf,
    /// Vectorizer settings
    pub vectorizer: VectorizerConfig,
    /// Classifier settings
    pub classifier: ClassifierConfig,
    /// Train/test split and balance checks
    pub training: TrainingConfig,
    /// Local attribution settings
    pub attribution: AttributionConfig,
    /// Linguistic audit thresholds
    pub audit: AuditThresholds,
    /// Similarity retrieval settings
    pub retrieval: RetrievalConfig,
    /// Entries per global importance table
    pub importance_top_k: usize,
    /// Minimum word count accepted by `predict`
    pub min_words: usize,
}

impl Default for VeracityConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("models"),
            vectorizer: VectorizerConfig::default(),
            classifier: ClassifierConfig::default(),
            training: TrainingConfig::default(),
            attribution: AttributionConfig::default(),
            audit: AuditThresholds::default(),
            retrieval: RetrievalConfig::default(),
            importance_top_k: 25,
            min_words: 5,
        }
    }
}

impl VeracityConfig {
    /// Load configuration from a JSON file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any value
    /// fails [`VeracityConfig::validate`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `VERACITY_ARTIFACTS` if set.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(ARTIFACTS_ENV) {
            if !dir.trim().is_empty() {
                self.artifacts_dir = PathBuf::from(dir);
            }
        }
        self
    }

    /// Sets the artifact directory.
    #[must_use]
    pub fn with_artifacts_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::InvalidHyperparameter`] naming the first
    /// offending value.
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.classifier.validate()?;
        self.training.validate()?;
        self.attribution.validate()?;
        self.retrieval.validate()?;
        if self.importance_top_k == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "importance_top_k",
                0,
                "> 0",
            ));
        }
        Ok(())
    }
}

/// TF-IDF vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Vocabulary size cap (`V_max`)
    pub max_features: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { max_features: 5000 }
    }
}

impl VectorizerConfig {
    /// Sets the vocabulary size cap.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "max_features",
                self.max_features,
                "> 0",
            ));
        }
        Ok(())
    }
}

/// Logistic regression settings, recorded alongside the fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Inverse regularization strength
    pub c: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Convergence tolerance on the max-abs gradient
    pub tol: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            c: 0.1,
            max_iter: 2000,
            tol: 1e-4,
        }
    }
}

impl ClassifierConfig {
    /// Sets the inverse regularization strength.
    #[must_use]
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(VeracityError::invalid_hyperparameter("c", self.c, "> 0"));
        }
        if self.max_iter == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "max_iter",
                self.max_iter,
                "> 0",
            ));
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(VeracityError::invalid_hyperparameter(
                "tol",
                self.tol,
                "> 0",
            ));
        }
        Ok(())
    }
}

/// Train/test split settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Held-out fraction
    pub test_size: f64,
    /// Shuffle seed
    pub seed: u64,
    /// Minority-class share below which training logs a balance warning
    pub balance_warning: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.15,
            seed: 44,
            balance_warning: 0.25,
        }
    }
}

impl TrainingConfig {
    /// Sets the held-out fraction.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Sets the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(VeracityError::invalid_hyperparameter(
                "test_size",
                self.test_size,
                "in (0, 1)",
            ));
        }
        Ok(())
    }
}

/// Monte Carlo permutation attribution settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// Sampled token orderings
    pub permutations: usize,
    /// Largest token count attributed; longer inputs are reported unavailable
    pub max_tokens: usize,
    /// Sampling seed
    pub seed: u64,
    /// Contributors listed in `top_tokens`
    pub top_k: usize,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            permutations: 128,
            max_tokens: 512,
            seed: 42,
            top_k: 10,
        }
    }
}

impl AttributionConfig {
    /// Sets the number of sampled permutations.
    #[must_use]
    pub fn with_permutations(mut self, permutations: usize) -> Self {
        self.permutations = permutations;
        self
    }

    /// Sets the token cap.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.permutations == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "permutations",
                0,
                "> 0",
            ));
        }
        if self.max_tokens == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "max_tokens",
                0,
                "> 0",
            ));
        }
        Ok(())
    }
}

/// Linguistic audit thresholds, in percent of `word_count + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditThresholds {
    /// All-caps word density
    pub sensationalism: f64,
    /// Exclamation mark density
    pub urgency: f64,
    /// Question mark density
    pub speculation: f64,
    /// Word counts below this raise the low-substance flag
    pub min_words: usize,
}

impl Default for AuditThresholds {
    fn default() -> Self {
        Self {
            sensationalism: 15.0,
            urgency: 5.0,
            speculation: 4.0,
            min_words: 35,
        }
    }
}

/// Similarity retrieval settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Reference documents sampled per query (`S_max`)
    pub sample_size: usize,
    /// Sampling seed
    pub seed: u64,
    /// Matches returned at most
    pub top_k: usize,
    /// Cosine similarity floor
    pub min_similarity: f64,
    /// Characters of body text kept in each excerpt
    pub excerpt_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            sample_size: 4000,
            seed: 42,
            top_k: 5,
            min_similarity: 0.08,
            excerpt_chars: 350,
        }
    }
}

impl RetrievalConfig {
    fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(VeracityError::invalid_hyperparameter(
                "sample_size",
                0,
                "> 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(VeracityError::invalid_hyperparameter(
                "min_similarity",
                self.min_similarity,
                "in [0, 1]",
            ));
        }
        Ok(())
    }
}
