//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use veracity::prelude::*;
//! ```

pub use crate::config::VeracityConfig;
pub use crate::corpus::{Corpus, Document, Label};
pub use crate::detector::Detector;
pub use crate::error::{Result, VeracityError};
pub use crate::explain::{Assessment, ForensicExplainer, LocalAttribution};
pub use crate::pipeline::FittedPipeline;
pub use crate::scoring::{LinguisticScorer, ModelScorer, Scorer};
pub use crate::serialization::ArtifactStore;
pub use crate::training::Trainer;
