//! Labeled news corpus and its CSV layout.
//!
//! A corpus directory holds two files with a header row: `True.csv` for
//! authentic articles and `Fake.csv` for fabricated ones. Only the `title`
//! and `text` columns are read; other columns are ignored and missing
//! cells are treated as empty strings.
//!
//! # Example
//!
//! ```
//! use veracity::corpus::{Corpus, Label};
//!
//! let dir = tempfile::tempdir().expect("temp dir");
//! Corpus::write_sample(dir.path()).expect("sample written");
//!
//! let corpus = Corpus::load(dir.path()).expect("sample loads");
//! assert_eq!(corpus.len(), 300);
//! assert_eq!(corpus.count(Label::Authentic), 150);
//! ```

use crate::error::{Result, VeracityError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File holding authentic articles.
pub const AUTHENTIC_FILE: &str = "True.csv";

/// File holding fabricated articles.
pub const FABRICATED_FILE: &str = "Fake.csv";

/// Ground-truth class of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Encoded as 0.
    Fabricated,
    /// Encoded as 1.
    Authentic,
}

impl Label {
    /// Numeric class used by the classifier.
    #[must_use]
    pub fn as_index(self) -> usize {
        match self {
            Self::Fabricated => 0,
            Self::Authentic => 1,
        }
    }

    /// Label for a numeric class; anything but 1 is fabricated.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        if index == 1 {
            Self::Authentic
        } else {
            Self::Fabricated
        }
    }

    /// Display status attached to retrieval results.
    #[must_use]
    pub fn status(self) -> &'static str {
        match self {
            Self::Fabricated => "Flagged",
            Self::Authentic => "Verified",
        }
    }

    /// Class names in index order, as used in reports.
    pub const NAMES: [&'static str; 2] = ["FABRICATED", "AUTHENTIC"];
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAMES[self.as_index()])
    }
}

/// A labeled article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Headline
    pub title: String,
    /// Article body
    pub body: String,
    /// Ground truth
    pub label: Label,
}

impl Document {
    /// Create a document.
    pub fn new(title: impl Into<String>, body: impl Into<String>, label: Label) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            label,
        }
    }

    /// Title and body joined by a single space.
    #[must_use]
    pub fn total_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Immutable labeled document collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Wrap documents in a corpus.
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load `True.csv` and `Fake.csv` from `dir`; authentic rows come first.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::TrainingDataMissing`] if either file is
    /// absent, or a CSV error if a file is malformed.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::from_csv_pair(dir.join(AUTHENTIC_FILE), dir.join(FABRICATED_FILE))
    }

    /// Load from explicit authentic and fabricated CSV paths.
    ///
    /// # Errors
    ///
    /// Same as [`Corpus::load`].
    pub fn from_csv_pair<P: AsRef<Path>, Q: AsRef<Path>>(authentic: P, fabricated: Q) -> Result<Self> {
        let authentic = authentic.as_ref();
        let fabricated = fabricated.as_ref();
        for path in [authentic, fabricated] {
            if !path.is_file() {
                return Err(VeracityError::TrainingDataMissing {
                    path: path.to_path_buf(),
                });
            }
        }

        let mut documents = read_csv(authentic, Label::Authentic)?;
        documents.extend(read_csv(fabricated, Label::Fabricated)?);

        let corpus = Self::new(documents);
        info!(
            documents = corpus.len(),
            authentic = corpus.count(Label::Authentic),
            fabricated = corpus.count(Label::Fabricated),
            "Loaded corpus"
        );
        Ok(corpus)
    }

    /// Write this corpus as `True.csv` and `Fake.csv` under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or files cannot be written.
    pub fn write_csv_pair<P: AsRef<Path>>(&self, dir: P) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let authentic = dir.join(AUTHENTIC_FILE);
        let fabricated = dir.join(FABRICATED_FILE);
        write_csv(&authentic, self.by_label(Label::Authentic))?;
        write_csv(&fabricated, self.by_label(Label::Fabricated))?;
        Ok((authentic, fabricated))
    }

    /// The synthetic corpus: three authentic and three fabricated
    /// templates, each repeated 50 times.
    #[must_use]
    pub fn sample() -> Self {
        let mut documents = Vec::with_capacity(SAMPLE_REPEATS * 6);
        for (templates, label) in [
            (AUTHENTIC_SAMPLES, Label::Authentic),
            (FABRICATED_SAMPLES, Label::Fabricated),
        ] {
            for _ in 0..SAMPLE_REPEATS {
                documents.extend(
                    templates
                        .iter()
                        .map(|(title, body)| Document::new(*title, *body, label)),
                );
            }
        }
        Self::new(documents)
    }

    /// Generate the synthetic corpus under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the files cannot be written.
    pub fn write_sample<P: AsRef<Path>>(dir: P) -> Result<(PathBuf, PathBuf)> {
        let paths = Self::sample().write_csv_pair(dir.as_ref())?;
        info!(dir = %dir.as_ref().display(), "Sample data generated");
        Ok(paths)
    }

    /// All documents.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Documents with `label`.
    pub fn by_label(&self, label: Label) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(move |d| d.label == label)
    }

    /// Number of documents with `label`.
    #[must_use]
    pub fn count(&self, label: Label) -> usize {
        self.by_label(label).count()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn read_csv(path: &Path, label: Label) -> Result<Vec<Document>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let title_idx = column("title");
    let text_idx = column("text");
    if title_idx.is_none() && text_idx.is_none() {
        return Err(VeracityError::Csv(format!(
            "{}: expected a 'title' or 'text' column, found {:?}",
            path.display(),
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let cell = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
    };

    let mut documents = Vec::new();
    for result in reader.records() {
        let record = result?;
        documents.push(Document::new(
            cell(&record, title_idx),
            cell(&record, text_idx),
            label,
        ));
    }

    debug!(path = %path.display(), rows = documents.len(), "Read CSV");
    Ok(documents)
}

fn write_csv<'a>(path: &Path, documents: impl Iterator<Item = &'a Document>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["title", "text"])?;
    for doc in documents {
        writer.write_record([doc.title.as_str(), doc.body.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

const SAMPLE_REPEATS: usize = 50;

const AUTHENTIC_SAMPLES: &[(&str, &str)] = &[
    (
        "Global Climate Accord Reached",
        "Leaders from 190 countries signed a historic agreement to reduce carbon emissions by 50% by 2030, citing Reuters reports.",
    ),
    (
        "New Tech Breakthrough in Solar Energy",
        "Researchers at MIT have developed a new solar cell that is 40% more efficient than current technologies, as reported by AP.",
    ),
    (
        "Economic Growth Exceeds Expectations",
        "The latest GDP figures show a 3.5% growth rate, outpacing analyst predictions of 2.8%, according to official Washington statistics.",
    ),
];

const FABRICATED_SAMPLES: &[(&str, &str)] = &[
    (
        "Alien Invasion Imminent Says Top Secret Source",
        "A leaked document from a secret underground base claims that aliens are planning to invade Earth next Tuesday. Share before it's deleted!",
    ),
    (
        "Magic Pill Cures All Diseases Instantly",
        "Big Pharma is hiding the truth about a $1 pill that can cure anything from the common cold to cancer. Doctors hate this one trick!",
    ),
    (
        "Celebrity Replaced by Clone, Evidence Found",
        "Fans noticed a change in the star's earlobe shape, proving they have been replaced by a government-funded biological clone.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_label_encoding() {
        assert_eq!(Label::Authentic.as_index(), 1);
        assert_eq!(Label::Fabricated.as_index(), 0);
        assert_eq!(Label::from_index(1), Label::Authentic);
        assert_eq!(Label::from_index(0), Label::Fabricated);
        assert_eq!(Label::Authentic.status(), "Verified");
        assert_eq!(Label::Fabricated.status(), "Flagged");
        assert_eq!(Label::Authentic.to_string(), "AUTHENTIC");
    }

    #[test]
    fn test_total_text() {
        let doc = Document::new("Title", "Body text", Label::Authentic);
        assert_eq!(doc.total_text(), "Title Body text");

        let empty = Document::new("", "", Label::Fabricated);
        assert_eq!(empty.total_text(), " ");
    }

    #[test]
    fn test_sample_shape() {
        let corpus = Corpus::sample();
        assert_eq!(corpus.len(), 300);
        assert_eq!(corpus.count(Label::Authentic), 150);
        assert_eq!(corpus.count(Label::Fabricated), 150);
    }

    #[test]
    fn test_sample_roundtrip_through_csv() {
        let dir = tempfile::tempdir().expect("temp dir");
        Corpus::write_sample(dir.path()).expect("written");
        let loaded = Corpus::load(dir.path()).expect("loaded");
        assert_eq!(loaded, Corpus::sample());
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Corpus::load(dir.path()).expect_err("no files");
        assert!(matches!(err, VeracityError::TrainingDataMissing { .. }));
    }

    #[test]
    fn test_extra_columns_and_missing_cells() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut true_csv = std::fs::File::create(dir.path().join(AUTHENTIC_FILE)).expect("create");
        writeln!(true_csv, "title,text,subject,date").expect("write");
        writeln!(true_csv, "Headline,\"Body, with comma\",news,2024-01-01").expect("write");
        writeln!(true_csv, ",Only body,news,2024-01-02").expect("write");
        let mut fake_csv = std::fs::File::create(dir.path().join(FABRICATED_FILE)).expect("create");
        writeln!(fake_csv, "subject,title").expect("write");
        writeln!(fake_csv, "gossip,Clone found").expect("write");

        let corpus = Corpus::load(dir.path()).expect("loaded");
        let docs = corpus.documents();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].body, "Body, with comma");
        assert_eq!(docs[1].title, "");
        assert_eq!(docs[2], Document::new("Clone found", "", Label::Fabricated));
    }

    #[test]
    fn test_missing_columns_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(AUTHENTIC_FILE), "a,b\n1,2\n").expect("write");
        std::fs::write(dir.path().join(FABRICATED_FILE), "title,text\nx,y\n").expect("write");
        assert!(matches!(
            Corpus::load(dir.path()),
            Err(VeracityError::Csv(_))
        ));
    }
}
