//! Training orchestration: split, fit, evaluate.
//!
//! # Example
//!
//! ```
//! use veracity::corpus::Corpus;
//! use veracity::training::Trainer;
//!
//! let outcome = Trainer::new().train(&Corpus::sample()).expect("sample trains");
//! assert!(outcome.metrics.accuracy > 0.9);
//! ```

use crate::classification::LogisticRegression;
use crate::config::{ClassifierConfig, TrainingConfig, VectorizerConfig, VeracityConfig};
use crate::corpus::{Corpus, Label};
use crate::error::{Result, VeracityError};
use crate::metrics::{
    accuracy, classification_report, confusion_matrix, roc_auc, ClassificationReport,
    ConfusionMatrix,
};
use crate::model_selection::train_test_split_indices;
use crate::pipeline::FittedPipeline;
use crate::serialization::ArtifactStore;
use crate::text::normalize::normalize;
use crate::text::vectorize::TfidfVectorizer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{info, warn};

/// Held-out evaluation of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Fraction of correct test predictions
    pub accuracy: f64,
    /// ROC-AUC of the authentic-class probability; `None` if the test split
    /// holds a single class
    pub roc_auc: Option<f64>,
    /// Per-class precision, recall and F1
    pub report: ClassificationReport,
    /// Rows are true labels, columns predictions (fabricated first)
    pub confusion_matrix: ConfusionMatrix,
    /// Training split size
    pub n_train: usize,
    /// Test split size
    pub n_test: usize,
    /// Vocabulary size
    pub n_features: usize,
    /// Optimizer iterations
    pub n_iter: usize,
    /// Whether the optimizer met its tolerance
    pub converged: bool,
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        match self.roc_auc {
            Some(auc) => writeln!(f, "ROC-AUC:  {auc:.4}")?,
            None => writeln!(f, "ROC-AUC:  undefined (single-class test split)")?,
        }
        writeln!(
            f,
            "Train/test: {}/{}  features: {}  iterations: {}{}",
            self.n_train,
            self.n_test,
            self.n_features,
            self.n_iter,
            if self.converged { "" } else { " (not converged)" }
        )?;
        writeln!(f)?;
        write!(f, "{}", self.report)?;
        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows = true, cols = predicted):")?;
        for (label, row) in Label::NAMES.iter().zip(self.confusion_matrix.rows()) {
            writeln!(f, "{label:>12} {row:?}")?;
        }
        Ok(())
    }
}

/// Result of a successful training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// The fitted vectorizer/classifier pair
    pub pipeline: FittedPipeline,
    /// Held-out metrics
    pub metrics: EvaluationMetrics,
}

/// Training orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    vectorizer: VectorizerConfig,
    classifier: ClassifierConfig,
    training: TrainingConfig,
}

impl Trainer {
    /// Trainer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trainer using the relevant sections of `config`.
    #[must_use]
    pub fn from_config(config: &VeracityConfig) -> Self {
        Self {
            vectorizer: config.vectorizer.clone(),
            classifier: config.classifier,
            training: config.training,
        }
    }

    /// Sets the vectorizer settings.
    #[must_use]
    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Sets the classifier settings.
    #[must_use]
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the split settings.
    #[must_use]
    pub fn with_training(mut self, training: TrainingConfig) -> Self {
        self.training = training;
        self
    }

    /// Fit a pipeline on `corpus` and evaluate it on a held-out split.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus is empty, the split leaves a side
    /// empty, the training split lacks a class, or fitting fails.
    pub fn train(&self, corpus: &Corpus) -> Result<TrainingOutcome> {
        if corpus.is_empty() {
            return Err(VeracityError::InvalidInput(
                "Cannot train on an empty corpus".to_string(),
            ));
        }

        info!(documents = corpus.len(), "Normalizing corpus");
        let start = Instant::now();
        let texts: Vec<String> = corpus
            .documents()
            .par_iter()
            .map(|doc| normalize(&doc.total_text()))
            .collect();
        let labels: Vec<usize> = corpus
            .documents()
            .iter()
            .map(|doc| doc.label.as_index())
            .collect();
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Normalization complete"
        );

        let (train_idx, test_idx) = train_test_split_indices(
            corpus.len(),
            self.training.test_size,
            self.training.seed,
        )?;
        let gather_texts = |idx: &[usize]| idx.iter().map(|&i| texts[i].as_str()).collect::<Vec<_>>();
        let gather_labels = |idx: &[usize]| idx.iter().map(|&i| labels[i]).collect::<Vec<_>>();
        let (train_texts, test_texts) = (gather_texts(&train_idx), gather_texts(&test_idx));
        let (y_train, y_test) = (gather_labels(&train_idx), gather_labels(&test_idx));

        self.check_balance(&y_train)?;

        info!("Fitting vectorizer");
        let vectorizer = TfidfVectorizer::from_config(&self.vectorizer).fit(&train_texts)?;
        let x_train = vectorizer.transform(&train_texts);
        let x_test = vectorizer.transform(&test_texts);

        info!(
            features = vectorizer.vocabulary_size(),
            c = self.classifier.c,
            max_iter = self.classifier.max_iter,
            "Fitting classifier"
        );
        let start = Instant::now();
        let model = LogisticRegression::from_config(self.classifier).fit(&x_train, &y_train)?;
        if model.converged() {
            info!(
                iterations = model.n_iter(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Classifier converged"
            );
        } else {
            warn!(
                iterations = model.n_iter(),
                tol = self.classifier.tol,
                "Classifier hit max_iter before converging"
            );
        }

        let scores = model.predict_proba_batch(&x_test);
        let y_pred: Vec<usize> = scores.iter().map(|&p| usize::from(p >= 0.5)).collect();
        let roc_auc = roc_auc(&scores, &y_test);
        if roc_auc.is_none() {
            warn!("Test split holds a single class; ROC-AUC undefined");
        }

        let metrics = EvaluationMetrics {
            accuracy: accuracy(&y_pred, &y_test),
            roc_auc,
            report: classification_report(&y_pred, &y_test, &Label::NAMES),
            confusion_matrix: confusion_matrix(&y_pred, &y_test, 2),
            n_train: y_train.len(),
            n_test: y_test.len(),
            n_features: vectorizer.vocabulary_size(),
            n_iter: model.n_iter(),
            converged: model.converged(),
        };
        info!(
            accuracy = metrics.accuracy,
            roc_auc = metrics.roc_auc.unwrap_or(f64::NAN),
            "Evaluation complete"
        );

        let pipeline = FittedPipeline::new(vectorizer, model)?;
        Ok(TrainingOutcome { pipeline, metrics })
    }

    /// Train on `corpus` and persist the pair to `store`.
    ///
    /// # Errors
    ///
    /// Any training error, or an I/O failure while saving. Nothing is
    /// persisted if training fails.
    pub fn train_and_save(&self, corpus: &Corpus, store: &ArtifactStore) -> Result<TrainingOutcome> {
        let outcome = self.train(corpus)?;
        store.save(&outcome.pipeline)?;
        Ok(outcome)
    }

    fn check_balance(&self, y_train: &[usize]) -> Result<()> {
        let authentic = y_train.iter().filter(|&&y| y == 1).count();
        let fabricated = y_train.len() - authentic;
        info!(authentic, fabricated, "Training split label balance");

        if authentic == 0 || fabricated == 0 {
            return Err(VeracityError::InvalidInput(format!(
                "Training split must contain both classes (authentic={authentic}, fabricated={fabricated})"
            )));
        }

        let minority = authentic.min(fabricated) as f64 / y_train.len() as f64;
        if minority < self.training.balance_warning {
            warn!(
                minority_share = minority,
                threshold = self.training.balance_warning,
                "Training split is imbalanced"
            );
        }
        Ok(())
    }
}

/// Train with every setting taken from `config`.
///
/// # Errors
///
/// See [`Trainer::train`].
pub fn train(corpus: &Corpus, config: &VeracityConfig) -> Result<TrainingOutcome> {
    Trainer::from_config(config).train(corpus)
}

/// Pipeline trained once on the sample corpus, shared by unit tests.
#[cfg(test)]
pub(crate) fn sample_pipeline() -> std::sync::Arc<FittedPipeline> {
    use once_cell::sync::Lazy;
    use std::sync::Arc;

    static PIPELINE: Lazy<Arc<FittedPipeline>> = Lazy::new(|| {
        let outcome = Trainer::new()
            .train(&Corpus::sample())
            .expect("sample corpus trains");
        Arc::new(outcome.pipeline)
    });
    Arc::clone(&PIPELINE)
}
