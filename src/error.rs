//! Error types for Veracity operations.
//!
//! Classification errors are user-visible and block a verdict. Explanation
//! errors are normally absorbed into a degraded result by the explainer and
//! only surface through this type when a caller asks for them directly.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VeracityError>;

/// Main error type for Veracity operations.
///
/// # Examples
///
/// ```
/// use veracity::error::VeracityError;
///
/// let err = VeracityError::InputTooShort { words: 3, min_words: 5 };
/// assert!(err.to_string().contains("3 words"));
/// ```
#[derive(Error, Debug)]
pub enum VeracityError {
    /// Input has fewer words than the classifier accepts.
    #[error("Input too short: {words} words, at least {min_words} required")]
    InputTooShort {
        /// Words found in the input
        words: usize,
        /// Minimum accepted word count
        min_words: usize,
    },

    /// Input is empty or whitespace only.
    #[error("No input provided")]
    EmptyInput,

    /// No trained artifact pair is loaded.
    #[error("Model unavailable: {reason}")]
    ModelUnavailable {
        /// Why classification is offline
        reason: String,
    },

    /// Attribution could not be computed.
    #[error("Explanation unavailable: {reason}")]
    ExplanationUnavailable {
        /// Why the attribution failed
        reason: String,
    },

    /// Training corpus files are absent.
    #[error("Training data missing: {}", path.display())]
    TrainingDataMissing {
        /// Path that was expected to hold training data
        path: PathBuf,
    },

    /// Vectorizer and model come from different training runs.
    #[error("Artifact mismatch: vectorizer pair {vectorizer} does not match model pair {model}")]
    ArtifactMismatch {
        /// Pair id stamped into the vectorizer artifact
        vectorizer: String,
        /// Pair id stamped into the model artifact
        model: String,
    },

    /// Artifact file exists but cannot be decoded.
    #[error("Corrupt artifact {}: {reason}", path.display())]
    CorruptArtifact {
        /// Offending file
        path: PathBuf,
        /// Decoding failure description
        reason: String,
    },

    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Data shape or content is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VeracityError {
    /// Process exit code for this error, used by the CLI.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InputTooShort { .. } | Self::EmptyInput => ExitCode::from(2),
            Self::ModelUnavailable { .. } => ExitCode::from(3),
            Self::ExplanationUnavailable { .. } => ExitCode::from(4),
            Self::TrainingDataMissing { .. } => ExitCode::from(5),
            Self::ArtifactMismatch { .. } | Self::CorruptArtifact { .. } => ExitCode::from(6),
            Self::InvalidHyperparameter { .. } | Self::InvalidInput(_) => ExitCode::from(7),
            Self::Io(_) | Self::Csv(_) | Self::Serialization(_) => ExitCode::from(8),
        }
    }

    pub(crate) fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

impl From<&str> for VeracityError {
    fn from(msg: &str) -> Self {
        VeracityError::InvalidInput(msg.to_string())
    }
}

impl From<csv::Error> for VeracityError {
    fn from(err: csv::Error) -> Self {
        VeracityError::Csv(err.to_string())
    }
}

impl From<bincode::Error> for VeracityError {
    fn from(err: bincode::Error) -> Self {
        VeracityError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for VeracityError {
    fn from(err: serde_json::Error) -> Self {
        VeracityError::Serialization(err.to_string())
    }
}
