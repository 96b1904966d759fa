//! Rule-based linguistic audit of raw article text.
//!
//! Densities are percentages of `word_count + 1`:
//!
//! | signal         | counts                                   | flag when      |
//! |----------------|------------------------------------------|----------------|
//! | sensationalism | words of 2+ chars with every cased char uppercase | > 15% |
//! | urgency        | `!` characters                           | > 5%           |
//! | speculation    | `?` characters                           | > 4%           |
//! | low substance  | whitespace-separated words               | < 35 words     |
//!
//! ```
//! use veracity::explain::{Assessment, LinguisticAuditor};
//!
//! let report = LinguisticAuditor::new().audit("BREAKING!!! Aliens ARE here???").unwrap();
//! assert_eq!(report.assessment, Assessment::HighlySuspicious);
//! ```

use crate::config::AuditThresholds;
use crate::error::{Result, VeracityError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report line emitted when no rule fires.
pub const BENCHMARK_MESSAGE: &str = "Linguistic patterns verified within professional benchmarks.";

/// Overall verdict from the number of raised flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assessment {
    /// No flags
    Standard,
    /// One flag
    CautionAdvised,
    /// Two or more flags
    HighlySuspicious,
}

impl Assessment {
    /// Assessment for a flag count.
    #[must_use]
    pub fn from_flags(flags: usize) -> Self {
        match flags {
            0 => Self::Standard,
            1 => Self::CautionAdvised,
            _ => Self::HighlySuspicious,
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "Standard",
            Self::CautionAdvised => "Caution Advised",
            Self::HighlySuspicious => "Highly Suspicious",
        })
    }
}

/// Which rule raised a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditFlag {
    /// All-caps density over threshold
    Sensationalism,
    /// Exclamation density over threshold
    Urgency,
    /// Question mark density over threshold
    Speculation,
    /// Too few words
    LowSubstance,
}

/// Raw densities, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditScores {
    /// All-caps words per 100 words
    pub sensationalism: f64,
    /// Exclamation marks per 100 words
    pub urgency: f64,
    /// Question marks per 100 words
    pub speculation: f64,
    /// Whitespace-separated words
    pub word_count: usize,
    /// All-caps words
    pub caps_words: usize,
    /// `!` characters
    pub exclamations: usize,
    /// `?` characters
    pub questions: usize,
}

/// Result of a linguistic audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Overall verdict
    pub assessment: Assessment,
    /// One message per raised flag, or the benchmark message
    pub report: Vec<String>,
    /// `Sensationalism`, `Urgency`, `Speculation` as `"{:.1}%"`
    pub stats: Vec<(String, String)>,
    /// Raised flags in rule order
    pub flags: Vec<AuditFlag>,
    /// Unformatted densities
    pub scores: AuditScores,
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Assessment: {}", self.assessment)?;
        for (name, value) in &self.stats {
            writeln!(f, "  {name:<15} {value:>7}")?;
        }
        for line in &self.report {
            writeln!(f, "- {line}")?;
        }
        Ok(())
    }
}

/// Applies [`AuditThresholds`] to raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinguisticAuditor {
    thresholds: AuditThresholds,
}

impl LinguisticAuditor {
    /// Auditor with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Auditor with custom thresholds.
    #[must_use]
    pub fn with_thresholds(thresholds: AuditThresholds) -> Self {
        Self { thresholds }
    }

    /// Current thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &AuditThresholds {
        &self.thresholds
    }

    /// Measure densities without applying thresholds.
    #[must_use]
    pub fn scores(text: &str) -> AuditScores {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let caps_words = words.iter().filter(|w| is_shouted(w)).count();
        let exclamations = text.matches('!').count();
        let questions = text.matches('?').count();

        let denom = (word_count + 1) as f64;
        AuditScores {
            sensationalism: 100.0 * caps_words as f64 / denom,
            urgency: 100.0 * exclamations as f64 / denom,
            speculation: 100.0 * questions as f64 / denom,
            word_count,
            caps_words,
            exclamations,
            questions,
        }
    }

    /// Audit raw text.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::EmptyInput`] for empty or whitespace-only
    /// text.
    pub fn audit(&self, text: &str) -> Result<AuditReport> {
        if text.trim().is_empty() {
            return Err(VeracityError::EmptyInput);
        }

        let scores = Self::scores(text);
        let t = &self.thresholds;
        let mut flags = Vec::new();
        let mut report = Vec::new();

        if scores.sensationalism > t.sensationalism {
            flags.push(AuditFlag::Sensationalism);
            report.push(format!(
                "HIGH SENSATIONALISM: {} words are in ALL CAPS. Pattern matching clickbait signatures.",
                scores.caps_words
            ));
        }
        if scores.urgency > t.urgency {
            flags.push(AuditFlag::Urgency);
            report.push(format!(
                "URGENCY MARKERS: High frequency of exclamation marks ({}). Likely emotional provocation.",
                scores.exclamations
            ));
        }
        if scores.speculation > t.speculation {
            flags.push(AuditFlag::Speculation);
            report.push(
                "SPECULATIVE TONE: High density of interrogation marks. Suggests unverified inquiry patterns."
                    .to_string(),
            );
        }
        if scores.word_count < t.min_words {
            flags.push(AuditFlag::LowSubstance);
            report.push(
                "LOW SUBSTANCE: Article length below forensic threshold. Legitimate reports typically provide greater context."
                    .to_string(),
            );
        }
        if report.is_empty() {
            report.push(BENCHMARK_MESSAGE.to_string());
        }

        let stats = vec![
            ("Sensationalism".to_string(), format!("{:.1}%", scores.sensationalism)),
            ("Urgency".to_string(), format!("{:.1}%", scores.urgency)),
            ("Speculation".to_string(), format!("{:.1}%", scores.speculation)),
        ];

        Ok(AuditReport {
            assessment: Assessment::from_flags(flags.len()),
            report,
            stats,
            flags,
            scores,
        })
    }
}

/// Longer than one character, has a cased character, and no lowercase.
fn is_shouted(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(|c| c.is_uppercase() || c.is_lowercase())
        && !word.chars().any(char::is_lowercase)
}
