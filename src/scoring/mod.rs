//! Independent suspicion signals over raw text.
//!
//! Each [`Scorer`] turns an article into a [`Signal`]: a suspicion level in
//! `[0, 1]`, the class it leans toward, and a one-line summary. Two scorers
//! ship with the crate:
//!
//! | Scorer              | Source                    | Suspicion             |
//! |---------------------|---------------------------|-----------------------|
//! | [`LinguisticScorer`] | style rules, no model    | raised flags / 4      |
//! | [`ModelScorer`]      | fitted pipeline          | `p_fabricated`        |
//!
//! ```
//! use veracity::scoring::{LinguisticScorer, Scorer};
//!
//! let signal = LinguisticScorer::new().audit("SHOCKING!!! They LIED???").unwrap();
//! assert!(signal.suspicion >= 0.5);
//! ```

use crate::config::{AuditThresholds, VeracityConfig};
use crate::corpus::Label;
use crate::error::{Result, VeracityError};
use crate::explain::LinguisticAuditor;
use crate::pipeline::FittedPipeline;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Rules evaluated by the linguistic audit.
const AUDIT_RULES: f64 = 4.0;

/// One scorer's reading of an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Name of the scorer that produced the signal
    pub scorer: String,
    /// Suspicion in `[0, 1]`; higher leans fabricated
    pub suspicion: f64,
    /// Class the signal favors
    pub leaning: Label,
    /// Human-readable summary
    pub summary: String,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] suspicion {:.1}% ({}): {}",
            self.scorer,
            self.suspicion * 100.0,
            self.leaning,
            self.summary
        )
    }
}

/// A source of suspicion signals.
pub trait Scorer: Send + Sync {
    /// Stable scorer name.
    fn name(&self) -> &'static str;

    /// Score raw article text.
    ///
    /// # Errors
    ///
    /// Implementations reject inputs they cannot score.
    fn audit(&self, text: &str) -> Result<Signal>;
}

fn leaning_of(suspicion: f64) -> Label {
    if suspicion >= 0.5 {
        Label::Fabricated
    } else {
        Label::Authentic
    }
}

/// Style-rule scorer; needs no trained model.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinguisticScorer {
    auditor: LinguisticAuditor,
}

impl LinguisticScorer {
    /// Scorer with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer with custom thresholds.
    #[must_use]
    pub fn with_thresholds(thresholds: AuditThresholds) -> Self {
        Self {
            auditor: LinguisticAuditor::with_thresholds(thresholds),
        }
    }
}

impl Scorer for LinguisticScorer {
    fn name(&self) -> &'static str {
        "linguistic"
    }

    fn audit(&self, text: &str) -> Result<Signal> {
        let report = self.auditor.audit(text)?;
        let suspicion = (report.flags.len() as f64 / AUDIT_RULES).min(1.0);
        Ok(Signal {
            scorer: self.name().to_string(),
            suspicion,
            leaning: leaning_of(suspicion),
            summary: format!("{} ({} flags)", report.assessment, report.flags.len()),
        })
    }
}

/// Classifier-backed scorer.
#[derive(Debug, Clone)]
pub struct ModelScorer {
    pipeline: Arc<FittedPipeline>,
    min_words: usize,
}

impl ModelScorer {
    /// Scorer over `pipeline` with the default minimum of 5 words.
    #[must_use]
    pub fn new(pipeline: Arc<FittedPipeline>) -> Self {
        Self::from_config(pipeline, &VeracityConfig::default())
    }

    /// Scorer taking its word minimum from `config`.
    #[must_use]
    pub fn from_config(pipeline: Arc<FittedPipeline>, config: &VeracityConfig) -> Self {
        Self {
            pipeline,
            min_words: config.min_words,
        }
    }
}

impl Scorer for ModelScorer {
    fn name(&self) -> &'static str {
        "model"
    }

    fn audit(&self, text: &str) -> Result<Signal> {
        let words = text.split_whitespace().count();
        if words == 0 {
            return Err(VeracityError::EmptyInput);
        }
        if words < self.min_words {
            return Err(VeracityError::InputTooShort {
                words,
                min_words: self.min_words,
            });
        }

        let (p_fabricated, p_authentic) = self.pipeline.predict_proba(text);
        Ok(Signal {
            scorer: self.name().to_string(),
            suspicion: p_fabricated,
            leaning: leaning_of(p_fabricated),
            summary: format!(
                "p(fabricated) = {p_fabricated:.3}, p(authentic) = {p_authentic:.3}"
            ),
        })
    }
}
