//! Classification metrics for evaluating classifier performance.
//!
//! Provides accuracy, per-class precision, recall and F1-score, the
//! confusion matrix, and a classification report with macro and weighted
//! averages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Panics
///
/// Panics if slices have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use veracity::metrics::classification::accuracy;
///
/// let y_true = vec![0, 1, 1, 0, 1, 0];
/// let y_pred = vec![0, 1, 0, 0, 0, 1];
/// let acc = accuracy(&y_pred, &y_true);
/// assert!((acc - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Slices must have same length");
    assert!(!y_true.is_empty(), "Slices cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f64 / y_true.len() as f64
}

/// Compute precision for a class given true positives and false positives.
fn class_precision(tp: usize, fp: usize) -> f64 {
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// Compute recall for a class given true positives and false negatives.
fn class_recall(tp: usize, fn_count: usize) -> f64 {
    if tp + fn_count == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_count) as f64
    }
}

/// Compute F1 score from precision and recall.
fn f1_from_prec_rec(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Confusion matrix: rows are true labels, columns predicted labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    n_classes: usize,
    counts: Vec<usize>,
}

impl ConfusionMatrix {
    /// Count of samples with label `true_label` predicted as `pred_label`.
    #[must_use]
    pub fn get(&self, true_label: usize, pred_label: usize) -> usize {
        if true_label >= self.n_classes || pred_label >= self.n_classes {
            return 0;
        }
        self.counts[true_label * self.n_classes + pred_label]
    }

    /// Number of classes (rows and columns).
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Matrix rows, one per true label.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.counts
            .chunks(self.n_classes.max(1))
            .map(<[usize]>::to_vec)
            .collect()
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Compute the confusion matrix over `n_classes` labels.
///
/// Labels at or beyond `n_classes` are ignored.
///
/// # Examples
///
/// ```
/// use veracity::metrics::classification::confusion_matrix;
///
/// let y_true = vec![0, 0, 1, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let cm = confusion_matrix(&y_pred, &y_true, 2);
/// assert_eq!(cm.get(0, 1), 1);
/// assert_eq!(cm.get(1, 1), 2);
/// ```
#[must_use]
pub fn confusion_matrix(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> ConfusionMatrix {
    let mut counts = vec![0usize; n_classes * n_classes];

    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        if true_label < n_classes && pred_label < n_classes {
            counts[true_label * n_classes + pred_label] += 1;
        }
    }

    ConfusionMatrix { n_classes, counts }
}

/// Precision, recall, F1 and support of one class or one average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// TP / (TP + FP)
    pub precision: f64,
    /// TP / (TP + FN)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Number of true instances
    pub support: usize,
}

/// Per-class metrics with macro and weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// `(class name, metrics)` in label order
    pub classes: Vec<(String, ClassMetrics)>,
    /// Overall accuracy
    pub accuracy: f64,
    /// Unweighted mean over classes
    pub macro_avg: ClassMetrics,
    /// Mean weighted by support
    pub weighted_avg: ClassMetrics,
}

/// Build a classification report. Label `i` is named `target_names[i]`.
///
/// # Panics
///
/// Panics if slices have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use veracity::metrics::classification::classification_report;
///
/// let y_true = vec![0, 0, 1, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let report = classification_report(&y_pred, &y_true, &["FAKE", "REAL"]);
/// assert_eq!(report.classes[1].1.recall, 1.0);
/// assert_eq!(report.macro_avg.support, 4);
/// ```
#[must_use]
pub fn classification_report(
    y_pred: &[usize],
    y_true: &[usize],
    target_names: &[&str],
) -> ClassificationReport {
    let accuracy = accuracy(y_pred, y_true);
    let n_classes = target_names.len();
    let cm = confusion_matrix(y_pred, y_true, n_classes);

    let classes: Vec<(String, ClassMetrics)> = target_names
        .iter()
        .enumerate()
        .map(|(c, name)| {
            let tp = cm.get(c, c);
            let support: usize = (0..n_classes).map(|p| cm.get(c, p)).sum();
            let predicted: usize = (0..n_classes).map(|t| cm.get(t, c)).sum();
            let precision = class_precision(tp, predicted - tp);
            let recall = class_recall(tp, support - tp);
            let metrics = ClassMetrics {
                precision,
                recall,
                f1: f1_from_prec_rec(precision, recall),
                support,
            };
            ((*name).to_string(), metrics)
        })
        .collect();

    let total_support: usize = classes.iter().map(|(_, m)| m.support).sum();
    let average = |weight: &dyn Fn(&ClassMetrics) -> f64| {
        let total_weight: f64 = classes.iter().map(|(_, m)| weight(m)).sum();
        let mean = |field: fn(&ClassMetrics) -> f64| {
            if total_weight == 0.0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|(_, m)| weight(m) * field(m))
                    .sum::<f64>()
                    / total_weight
            }
        };
        ClassMetrics {
            precision: mean(|m| m.precision),
            recall: mean(|m| m.recall),
            f1: mean(|m| m.f1),
            support: total_support,
        }
    };

    let macro_avg = average(&|_| 1.0);
    let weighted_avg = average(&|m| m.support as f64);

    ClassificationReport {
        classes,
        accuracy,
        macro_avg,
        weighted_avg,
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|(name, _)| name.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(12);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, metrics) in &self.classes {
            write_row(f, name, metrics, width)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, "macro avg", &self.macro_avg, width)?;
        write_row(f, "weighted avg", &self.weighted_avg, width)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics, width: usize) -> fmt::Result {
    writeln!(
        f,
        "{name:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        m.precision, m.recall, m.f1, m.support
    )
}
