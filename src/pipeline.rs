//! The fitted vectorizer/classifier pair.

use crate::classification::ModelState;
use crate::error::{Result, VeracityError};
use crate::primitives::SparseVector;
use crate::serialization;
use crate::text::normalize::normalize;
use crate::text::vectorize::VectorizerState;

/// A vectorizer and the classifier trained on its features.
///
/// Immutable once built and meant to be shared behind an `Arc`. The pair id
/// is a digest of both serialized halves; persisted artifacts carry it so
/// halves from different training runs are never combined.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPipeline {
    vectorizer: VectorizerState,
    model: ModelState,
    pair_id: String,
}

impl FittedPipeline {
    /// Pair a vectorizer with its model and stamp the pair id.
    ///
    /// # Errors
    ///
    /// Returns an error if the model's feature count differs from the
    /// vocabulary size, or the halves cannot be serialized.
    pub fn new(vectorizer: VectorizerState, model: ModelState) -> Result<Self> {
        check_dimensions(&vectorizer, &model)?;
        let vectorizer_bytes = serialization::encode_payload(&vectorizer)?;
        let model_bytes = serialization::encode_payload(&model)?;
        let pair_id = serialization::pair_id(&vectorizer_bytes, &model_bytes);
        Ok(Self {
            vectorizer,
            model,
            pair_id,
        })
    }

    /// Reassemble a pair read from disk; the caller has verified the id.
    pub(crate) fn from_parts(
        vectorizer: VectorizerState,
        model: ModelState,
        pair_id: String,
    ) -> Result<Self> {
        check_dimensions(&vectorizer, &model)?;
        Ok(Self {
            vectorizer,
            model,
            pair_id,
        })
    }

    /// Normalize raw text and vectorize it.
    #[must_use]
    pub fn featurize(&self, raw: &str) -> SparseVector {
        self.vectorizer.transform_one(&normalize(raw))
    }

    /// `(p_fabricated, p_authentic)` for raw text.
    #[must_use]
    pub fn predict_proba(&self, raw: &str) -> (f64, f64) {
        self.model.predict_proba(&self.featurize(raw))
    }

    /// Classifier logit for raw text.
    #[must_use]
    pub fn logit(&self, raw: &str) -> f64 {
        self.model.logit(&self.featurize(raw))
    }

    /// The fitted vectorizer.
    #[must_use]
    pub fn vectorizer(&self) -> &VectorizerState {
        &self.vectorizer
    }

    /// The fitted classifier.
    #[must_use]
    pub fn model(&self) -> &ModelState {
        &self.model
    }

    /// Content digest shared by both halves.
    #[must_use]
    pub fn pair_id(&self) -> &str {
        &self.pair_id
    }
}

fn check_dimensions(vectorizer: &VectorizerState, model: &ModelState) -> Result<()> {
    if vectorizer.vocabulary_size() != model.n_features() {
        return Err(VeracityError::InvalidInput(format!(
            "Model expects {} features but vocabulary has {} terms",
            model.n_features(),
            vectorizer.vocabulary_size()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::LogisticRegression;
    use crate::text::vectorize::TfidfVectorizer;

    fn fitted(docs: &[&str], labels: &[usize]) -> FittedPipeline {
        let normalized: Vec<String> = docs.iter().map(|d| normalize(d)).collect();
        let vectorizer = TfidfVectorizer::new().fit(&normalized).expect("fit");
        let x = vectorizer.transform(&normalized);
        let model = LogisticRegression::new().fit(&x, labels).expect("fit");
        FittedPipeline::new(vectorizer, model).expect("pair")
    }

    #[test]
    fn test_pair_id_is_content_digest() {
        let docs = ["official statistics report growth", "secret alien clone invasion"];
        let a = fitted(&docs, &[1, 0]);
        let b = fitted(&docs, &[1, 0]);
        assert_eq!(a.pair_id(), b.pair_id());
        assert_eq!(a.pair_id().len(), 16);

        let c = fitted(&["official report", "alien clone"], &[1, 0]);
        assert_ne!(a.pair_id(), c.pair_id());
    }

    #[test]
    fn test_predict_proba_from_raw_text() {
        let pipeline = fitted(
            &["Official statistics report growth", "Secret alien clone invasion!"],
            &[1, 0],
        );
        let (p0, p1) = pipeline.predict_proba("The official statistics show growth");
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!(p1 > p0);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let a = fitted(&["official report", "alien clone"], &[1, 0]);
        let b = fitted(&["official report growth", "alien clone"], &[1, 0]);
        let result = FittedPipeline::new(a.vectorizer().clone(), b.model().clone());
        assert!(result.is_err());
    }
}
