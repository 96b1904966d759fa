//! Global feature importance from classifier weights.

use crate::pipeline::FittedPipeline;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The most authentic-leaning and most fabricated-leaning vocabulary terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalImportance {
    /// Largest positive weights, descending
    pub authentic_markers: Vec<(String, f64)>,
    /// Most negative weights, ascending
    pub anomaly_triggers: Vec<(String, f64)>,
}

/// Rank vocabulary terms by classifier weight.
///
/// Markers are the `top_k` largest weights in descending order; triggers
/// the `top_k` smallest in ascending order. Equal weights are ordered by
/// term. A term may appear in both tables when the vocabulary is smaller
/// than `2 * top_k`.
#[must_use]
pub fn global_importance(pipeline: &FittedPipeline, top_k: usize) -> GlobalImportance {
    let mut ranked: Vec<(&str, f64)> = pipeline
        .vectorizer()
        .feature_names()
        .iter()
        .map(String::as_str)
        .zip(pipeline.model().weights().iter().copied())
        .collect();

    let owned = |items: &[(&str, f64)]| -> Vec<(String, f64)> {
        items
            .iter()
            .take(top_k)
            .map(|&(term, w)| (term.to_string(), w))
            .collect()
    };

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    let authentic_markers = owned(&ranked);

    ranked.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    let anomaly_triggers = owned(&ranked);

    GlobalImportance {
        authentic_markers,
        anomaly_triggers,
    }
}
