//! Deterministic text normalization.
//!
//! The same transform runs at training and inference time:
//!
//! 1. lowercase
//! 2. strip URLs (`http://`, `https://`, `www.` prefixes)
//! 3. strip ASCII punctuation
//! 4. strip digit runs
//! 5. collapse whitespace and trim
//! 6. drop stop words and tokens of at most two characters
//! 7. lemmatize, then drop lemmas that became stop words or too short
//! 8. rejoin with single spaces
//!
//! The output is idempotent: normalizing normalized text returns it
//! unchanged.
//!
//! ```
//! use veracity::text::normalize::normalize;
//!
//! let cleaned = normalize("BREAKING: Visit https://example.com for 100 reasons the Clones are HERE!");
//! assert_eq!(cleaned, "breaking visit reason clone");
//! ```

use crate::text::lemmatize::{Lemmatizer, NounLemmatizer};
use crate::text::stopwords::StopWordsFilter;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid URL pattern"));

static PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[!-/:-@\[-`{-~]").expect("valid punctuation pattern"));

static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// Tokens of this many characters or fewer are dropped.
const MAX_SHORT_TOKEN: usize = 2;

/// Text normalizer bound to a stop-word set and a lemmatizer.
///
/// Both are read-only for the normalizer's lifetime; the shared default
/// instance uses process-wide statics initialized on first use.
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer<L = NounLemmatizer> {
    stop_words: &'static StopWordsFilter,
    lemmatizer: L,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Normalizer with the compact English stop words and noun lemmatizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stop_words: StopWordsFilter::english(),
            lemmatizer: NounLemmatizer::new(),
        }
    }
}

impl<L: Lemmatizer> TextNormalizer<L> {
    /// Normalizer with a custom lemmatizer.
    pub fn with_lemmatizer(stop_words: &'static StopWordsFilter, lemmatizer: L) -> Self {
        Self {
            stop_words,
            lemmatizer,
        }
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() > MAX_SHORT_TOKEN && !self.stop_words.is_stop_word(token)
    }

    /// Normalized tokens of `raw`, in order.
    #[must_use]
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        let lowered = raw.to_lowercase();
        let no_urls = URL_RE.replace_all(&lowered, "");
        let no_punct = PUNCT_RE.replace_all(&no_urls, "");
        let no_digits = DIGIT_RE.replace_all(&no_punct, "");

        no_digits
            .split_whitespace()
            .filter(|t| self.keep(t))
            .map(|t| self.lemmatizer.lemmatize(t))
            .filter(|lemma| self.keep(lemma))
            .collect()
    }

    /// Normalize `raw` into a space-joined token string.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        self.tokens(raw).join(" ")
    }
}

static DEFAULT: Lazy<TextNormalizer> = Lazy::new(TextNormalizer::new);

/// Normalize with the shared default normalizer.
#[must_use]
pub fn normalize(raw: &str) -> String {
    DEFAULT.normalize(raw)
}

/// Normalize optional input; `None` yields an empty string.
#[must_use]
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// Normalized tokens with the shared default normalizer.
#[must_use]
pub fn normalized_tokens(raw: &str) -> Vec<String> {
    DEFAULT.tokens(raw)
}
