//! Evaluation metrics for the binary classifier.
//!
//! Classification metrics (accuracy, precision, recall, F1-score, confusion
//! matrix, classification report) and ranking metrics (ROC-AUC).

pub mod classification;
pub mod ranking;

pub use classification::{
    accuracy, classification_report, confusion_matrix, ClassMetrics, ClassificationReport,
    ConfusionMatrix,
};
pub use ranking::roc_auc;
