//! Dictionary lemmatization for text normalization.
//!
//! Lemmatization maps an inflected word to its dictionary base form:
//! "studies" -> "study", "churches" -> "church", "children" -> "child".
//! Unlike stemming, the output is always a real word or the input itself.
//!
//! Words are treated as nouns. Irregular plurals come from a fixed exception
//! dictionary; regular plurals are reduced by suffix rules that refuse to
//! fire on endings that are usually part of the base form (`-ss`, `-us`,
//! `-is`).
//!
//! # Examples
//!
//! ```
//! use veracity::text::lemmatize::{Lemmatizer, NounLemmatizer};
//!
//! let lemmatizer = NounLemmatizer::new();
//! assert_eq!(lemmatizer.lemmatize("studies"), "study");
//! assert_eq!(lemmatizer.lemmatize("children"), "child");
//! assert_eq!(lemmatizer.lemmatize("glass"), "glass");
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Trait for lemmatization algorithms.
///
/// Implementations must be idempotent: the lemma of a lemma is itself.
pub trait Lemmatizer {
    /// Lemmatize a single lowercase word.
    fn lemmatize(&self, word: &str) -> String;

    /// Lemmatize multiple tokens.
    fn lemmatize_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| self.lemmatize(token.as_ref()))
            .collect()
    }
}

/// Irregular noun forms: (inflected, lemma).
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("media", "medium"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("goes", "go"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("buses", "bus"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("censuses", "census"),
    ("statuses", "status"),
    ("gases", "gas"),
    ("aliases", "alias"),
    ("biases", "bias"),
    ("canvases", "canvas"),
];

/// Words ending in `s` that are already base forms.
const INVARIANT_WORDS: &[&str] = &[
    "news", "series", "species", "means", "physics", "politics", "economics",
    "mathematics", "ethics", "athletics", "tactics", "statistics", "kudos",
    "chaos", "lens", "atlas", "alias", "bias", "canvas", "gas", "yes",
    "always", "perhaps", "whereas", "sometimes", "afterwards", "towards",
    "headquarters", "arms", "thanks", "pants", "scissors", "clothes",
    "savings", "outskirts", "premises", "ones",
];

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_NOUNS.iter().copied().collect());

static INVARIANT: Lazy<std::collections::HashSet<&'static str>> =
    Lazy::new(|| INVARIANT_WORDS.iter().copied().collect());

/// Noun lemmatizer combining an exception dictionary with plural rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounLemmatizer;

impl NounLemmatizer {
    /// Create a new lemmatizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Apply the regular plural rules, or `None` if no rule fires.
    fn regular_plural(word: &str) -> Option<String> {
        let n = word.chars().count();

        if n > 4 && word.ends_with("ies") {
            return Some(format!("{}y", &word[..word.len() - 3]));
        }
        if word.ends_with("sses")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("xes")
            || word.ends_with("zzes")
        {
            return Some(word[..word.len() - 2].to_string());
        }
        if n > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return Some(word[..word.len() - 1].to_string());
        }
        None
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = IRREGULAR.get(word) {
            return (*lemma).to_string();
        }
        if INVARIANT.contains(word) {
            return word.to_string();
        }
        match Self::regular_plural(word) {
            // Landing on an irregular plural would make a second pass
            // disagree with the first.
            Some(lemma) if !IRREGULAR.contains_key(lemma.as_str()) => lemma,
            _ => word.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "lemmatize_tests.rs"]
mod tests;
