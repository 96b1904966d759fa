//! Stop words filtering for text preprocessing.
//!
//! Two built-in English lists are provided:
//! - [`StopWordsFilter::english`]: the compact list applied by the text
//!   normalizer (pronouns, auxiliaries, determiners, contraction fragments).
//! - [`StopWordsFilter::english_extended`]: a broader list applied when the
//!   vectorizer chooses its vocabulary. It is a superset of the compact list.
//!
//! # Examples
//!
//! ```
//! use veracity::text::stopwords::StopWordsFilter;
//!
//! let filter = StopWordsFilter::english();
//! let filtered = filter.filter(&["the", "quick", "brown", "fox"]);
//! assert_eq!(filtered, vec!["quick", "brown", "fox"]);
//! ```

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Stop words filter that removes common words from token lists.
///
/// Matching is case-insensitive; words are stored lowercase.
#[derive(Debug, Clone)]
pub struct StopWordsFilter {
    stop_words: HashSet<String>,
}

static ENGLISH: Lazy<StopWordsFilter> = Lazy::new(|| StopWordsFilter::new(ENGLISH_STOP_WORDS));

static ENGLISH_EXTENDED: Lazy<StopWordsFilter> = Lazy::new(|| {
    StopWordsFilter::new(
        ENGLISH_STOP_WORDS
            .iter()
            .chain(EXTENDED_STOP_WORDS.iter())
            .copied(),
    )
});

impl StopWordsFilter {
    /// Create a filter from custom stop words (lowercased on insert).
    ///
    /// ```
    /// use veracity::text::stopwords::StopWordsFilter;
    ///
    /// let filter = StopWordsFilter::new(vec!["foo", "bar"]);
    /// assert_eq!(filter.filter(&["foo", "test", "bar"]), vec!["test"]);
    /// ```
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();

        Self { stop_words }
    }

    /// Shared filter with the compact English list.
    #[must_use]
    pub fn english() -> &'static Self {
        &ENGLISH
    }

    /// Shared filter with the extended English list.
    #[must_use]
    pub fn english_extended() -> &'static Self {
        &ENGLISH_EXTENDED
    }

    /// Filter stop words from a list of tokens, preserving original case.
    #[must_use]
    pub fn filter<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !self.is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// Check if a word is a stop word (case-insensitive).
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.stop_words.contains(&word.to_lowercase())
        } else {
            self.stop_words.contains(word)
        }
    }

    /// Number of stop words in the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the filter is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

/// Compact English stop word list.
pub const ENGLISH_STOP_WORDS: &[&str] = &build_stop_words();

/// Category-based stop word definitions. Each tuple: (category, words).
const STOP_WORD_CATEGORIES: &[(&str, &[&str])] = &[
    ("articles", &["a", "an", "the"]),
    ("pronouns", &[
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
        "you", "your", "yours", "yourself", "yourselves",
        "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    ]),
    ("questions", &["what", "which", "who", "whom", "why", "when", "where", "how"]),
    ("determiners", &["this", "that", "these", "those"]),
    ("prepositions", &[
        "about", "above", "after", "against", "at", "before", "below", "between",
        "by", "down", "during", "for", "from", "in", "into", "of", "off", "on",
        "out", "over", "through", "to", "under", "until", "up", "with",
    ]),
    ("conjunctions", &["and", "as", "because", "but", "if", "nor", "or", "so", "than", "while"]),
    ("verbs", &[
        "am", "is", "are", "was", "were", "be", "been", "being",
        "have", "has", "had", "having", "do", "does", "did", "doing",
        "can", "will", "should",
    ]),
    ("adverbs_adjectives", &[
        "again", "further", "then", "once", "here", "there", "all", "any",
        "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "not", "only", "own", "same", "too", "very", "just", "now",
    ]),
    ("contraction_fragments", &[
        "s", "t", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
        "couldn", "didn", "doesn", "don", "hadn", "hasn", "haven", "isn", "ma",
        "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won",
        "wouldn",
    ]),
];

/// Additional words excluded from the vectorizer vocabulary.
const EXTENDED_STOP_WORDS: &[&str] = &[
    "across", "afterwards", "almost", "alone", "along", "already", "also",
    "although", "always", "among", "amongst", "amount", "another", "anyhow",
    "anyone", "anything", "anyway", "anywhere", "around", "back", "became",
    "become", "becomes", "becoming", "beforehand", "behind", "beside",
    "besides", "beyond", "bill", "bottom", "call", "cannot", "cant", "could",
    "couldnt", "cry", "describe", "detail", "done", "due", "eight", "either",
    "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "former", "formerly",
    "forty", "found", "four", "front", "full", "get", "give", "hasnt",
    "hence", "hereafter", "hereby", "herein", "hereupon", "however",
    "hundred", "inc", "indeed", "interest", "keep", "last", "latter",
    "latterly", "least", "less", "ltd", "made", "many", "may", "meanwhile",
    "might", "mill", "mine", "moreover", "mostly", "move", "much", "must",
    "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "nobody", "none", "noone", "nothing", "nowhere", "often", "one", "onto",
    "others", "otherwise", "part", "per", "perhaps", "please", "put",
    "rather", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "show", "side", "since", "sincere", "six", "sixty", "somehow",
    "someone", "something", "sometime", "sometimes", "somewhere", "still",
    "system", "take", "ten", "thence", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "thick", "thin", "third", "though", "three",
    "throughout", "thru", "thus", "together", "top", "toward", "towards",
    "twelve", "twenty", "two", "upon", "via", "well", "whatever", "whence",
    "whenever", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "whither", "whoever", "whole", "whose", "within",
    "without", "would", "yet",
];

/// Total number of stop words across all categories.
const TOTAL_STOP_WORDS: usize = count_total_stop_words();

/// Count total stop words at compile time.
const fn count_total_stop_words() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < STOP_WORD_CATEGORIES.len() {
        total += STOP_WORD_CATEGORIES[i].1.len();
        i += 1;
    }
    total
}

/// Flatten all category words into a single array at compile time.
const fn build_stop_words() -> [&'static str; TOTAL_STOP_WORDS] {
    let mut result = [""; TOTAL_STOP_WORDS];
    let mut idx = 0;
    let mut cat = 0;
    while cat < STOP_WORD_CATEGORIES.len() {
        let words = STOP_WORD_CATEGORIES[cat].1;
        let mut w = 0;
        while w < words.len() {
            result[idx] = words[w];
            idx += 1;
            w += 1;
        }
        cat += 1;
    }
    result
}

#[cfg(test)]
#[path = "stopwords_tests.rs"]
mod tests;
