//! Persistence of the fitted vectorizer/classifier pair.
//!
//! Each half is written to its own file with a fixed header:
//!
//! ```text
//! [4-byte magic: "VRTY"]
//! [4-byte version: u32 little-endian]
//! [4-byte kind: u32 little-endian, 1 = vectorizer, 2 = model]
//! [16-byte pair id: ASCII hex]
//! [4-byte CRC32 of payload: u32 little-endian]
//! [8-byte payload length: u64 little-endian]
//! [bincode payload]
//! ```
//!
//! The pair id is the first 16 hex digits of a SHA-256 over both payloads.
//! Loading checks magic, version, kind, length and checksum of each file,
//! then requires both files to carry the same pair id.

use crate::error::{Result, VeracityError};
use crate::pipeline::FittedPipeline;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Magic bytes opening every artifact.
pub const MAGIC: &[u8; 4] = b"VRTY";

/// Current artifact format version.
pub const VERSION: u32 = 1;

/// File name of the persisted vectorizer.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";

/// File name of the persisted model.
pub const MODEL_FILE: &str = "model.bin";

const PAIR_ID_LEN: usize = 16;
const HEADER_LEN: usize = 4 + 4 + 4 + PAIR_ID_LEN + 4 + 8;

/// Which half of the pair a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The fitted vectorizer
    Vectorizer,
    /// The fitted classifier
    Model,
}

impl ArtifactKind {
    fn code(self) -> u32 {
        match self {
            Self::Vectorizer => 1,
            Self::Model => 2,
        }
    }
}

/// Serialize a payload with bincode.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn encode_payload<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Pair id of two payloads: SHA-256 over both, length-prefixed, truncated
/// to 16 hex digits.
#[must_use]
pub fn pair_id(vectorizer_payload: &[u8], model_payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    for payload in [vectorizer_payload, model_payload] {
        hasher.update((payload.len() as u64).to_le_bytes());
        hasher.update(payload);
    }
    let digest = format!("{:x}", hasher.finalize());
    digest[..PAIR_ID_LEN].to_string()
}

/// Wrap a payload in the artifact header.
fn encode_artifact(kind: ArtifactKind, pair_id: &str, payload: &[u8]) -> Result<Vec<u8>> {
    if pair_id.len() != PAIR_ID_LEN || !pair_id.is_ascii() {
        return Err(VeracityError::InvalidInput(format!(
            "Pair id must be {PAIR_ID_LEN} ASCII characters, got {pair_id:?}"
        )));
    }

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&kind.code().to_le_bytes());
    bytes.extend_from_slice(pair_id.as_bytes());
    bytes.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(payload);
    Ok(bytes)
}

/// A verified artifact: its pair id and payload.
struct Artifact<'a> {
    pair_id: String,
    payload: &'a [u8],
}

/// Sequential header reader with error context.
struct HeaderReader<'a> {
    data: &'a [u8],
    path: &'a Path,
    offset: usize,
}

impl<'a> HeaderReader<'a> {
    fn corrupt(&self, reason: impl Into<String>) -> VeracityError {
        VeracityError::CorruptArtifact {
            path: self.path.to_path_buf(),
            reason: reason.into(),
        }
    }

    fn take(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        let bytes = self
            .offset
            .checked_add(n)
            .and_then(|end| self.data.get(self.offset..end))
            .ok_or_else(|| self.corrupt(format!("File too short to read {field}")))?;
        self.offset += n;
        Ok(bytes)
    }

    fn read_u32(&mut self, field: &str) -> Result<u32> {
        let bytes: [u8; 4] = self
            .take(4, field)?
            .try_into()
            .map_err(|_| self.corrupt(format!("Failed to read {field}")))?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_u64(&mut self, field: &str) -> Result<u64> {
        let bytes: [u8; 8] = self
            .take(8, field)?
            .try_into()
            .map_err(|_| self.corrupt(format!("Failed to read {field}")))?;
        Ok(u64::from_le_bytes(bytes))
    }
}

fn decode_artifact<'a>(data: &'a [u8], path: &'a Path, kind: ArtifactKind) -> Result<Artifact<'a>> {
    let mut reader = HeaderReader {
        data,
        path,
        offset: 0,
    };

    if reader.take(4, "magic")? != &MAGIC[..] {
        return Err(reader.corrupt("Not a veracity artifact (bad magic)"));
    }

    let version = reader.read_u32("version")?;
    if version != VERSION {
        return Err(reader.corrupt(format!(
            "Unsupported version {version}, expected {VERSION}"
        )));
    }

    let code = reader.read_u32("kind")?;
    if code != kind.code() {
        return Err(reader.corrupt(format!(
            "Expected {kind:?} artifact (kind {}), found kind {code}",
            kind.code()
        )));
    }

    let pair_id = std::str::from_utf8(reader.take(PAIR_ID_LEN, "pair id")?)
        .map_err(|_| reader.corrupt("Pair id is not valid UTF-8"))?
        .to_string();

    let stored_crc = reader.read_u32("checksum")?;
    let len = usize::try_from(reader.read_u64("payload length")?)
        .map_err(|_| reader.corrupt("Payload length overflows"))?;

    let payload = reader.take(len, "payload")?;
    if reader.offset != data.len() {
        return Err(reader.corrupt("Trailing bytes after payload"));
    }

    let computed_crc = crc32fast::hash(payload);
    if stored_crc != computed_crc {
        return Err(reader.corrupt(format!(
            "Checksum mismatch: stored {stored_crc:08x}, computed {computed_crc:08x}"
        )));
    }

    Ok(Artifact { pair_id, payload })
}

fn decode_payload<T: DeserializeOwned>(payload: &[u8], path: &Path) -> Result<T> {
    bincode::deserialize(payload).map_err(|e| VeracityError::CorruptArtifact {
        path: path.to_path_buf(),
        reason: format!("Payload does not decode: {e}"),
    })
}

/// Directory holding `vectorizer.bin` and `model.bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at `dir`.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the vectorizer artifact.
    #[must_use]
    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    /// Path of the model artifact.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Whether both artifact files exist.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.vectorizer_path().is_file() && self.model_path().is_file()
    }

    /// Persist both halves.
    ///
    /// Both files are written to temporaries and synced before either is
    /// renamed into place.
    ///
    /// # Errors
    ///
    /// Returns an error on any I/O or serialization failure; no artifact
    /// file is replaced in that case unless the failure is in the final
    /// renames.
    pub fn save(&self, pipeline: &FittedPipeline) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let vectorizer_bytes = encode_artifact(
            ArtifactKind::Vectorizer,
            pipeline.pair_id(),
            &encode_payload(pipeline.vectorizer())?,
        )?;
        let model_bytes = encode_artifact(
            ArtifactKind::Model,
            pipeline.pair_id(),
            &encode_payload(pipeline.model())?,
        )?;

        let vectorizer_tmp = self.dir.join(format!(".{VECTORIZER_FILE}.tmp"));
        let model_tmp = self.dir.join(format!(".{MODEL_FILE}.tmp"));
        write_synced(&vectorizer_tmp, &vectorizer_bytes)?;
        write_synced(&model_tmp, &model_bytes)?;

        fs::rename(&vectorizer_tmp, self.vectorizer_path())?;
        fs::rename(&model_tmp, self.model_path())?;
        sync_dir(&self.dir);

        info!(
            dir = %self.dir.display(),
            pair_id = pipeline.pair_id(),
            vectorizer_bytes = vectorizer_bytes.len(),
            model_bytes = model_bytes.len(),
            "Saved artifact pair"
        );
        Ok(())
    }

    /// Load and verify both halves.
    ///
    /// # Errors
    ///
    /// - [`VeracityError::ModelUnavailable`] if either file is missing
    /// - [`VeracityError::CorruptArtifact`] if a header, checksum or payload
    ///   is invalid
    /// - [`VeracityError::ArtifactMismatch`] if the files come from
    ///   different training runs
    pub fn load(&self) -> Result<FittedPipeline> {
        let vectorizer_path = self.vectorizer_path();
        let model_path = self.model_path();
        for path in [&vectorizer_path, &model_path] {
            if !path.is_file() {
                return Err(VeracityError::ModelUnavailable {
                    reason: format!("artifact not found: {}", path.display()),
                });
            }
        }

        let vectorizer_data = fs::read(&vectorizer_path)?;
        let model_data = fs::read(&model_path)?;

        let vectorizer_artifact =
            decode_artifact(&vectorizer_data, &vectorizer_path, ArtifactKind::Vectorizer)?;
        let model_artifact = decode_artifact(&model_data, &model_path, ArtifactKind::Model)?;

        if vectorizer_artifact.pair_id != model_artifact.pair_id {
            return Err(VeracityError::ArtifactMismatch {
                vectorizer: vectorizer_artifact.pair_id,
                model: model_artifact.pair_id,
            });
        }

        let digest = pair_id(vectorizer_artifact.payload, model_artifact.payload);
        if digest != vectorizer_artifact.pair_id {
            return Err(VeracityError::CorruptArtifact {
                path: self.dir.clone(),
                reason: format!(
                    "Pair id {} does not match payload digest {digest}",
                    vectorizer_artifact.pair_id
                ),
            });
        }

        let vectorizer = decode_payload(vectorizer_artifact.payload, &vectorizer_path)?;
        let model = decode_payload(model_artifact.payload, &model_path)?;
        let pipeline = FittedPipeline::from_parts(vectorizer, model, digest)?;

        debug!(
            dir = %self.dir.display(),
            pair_id = pipeline.pair_id(),
            "Loaded artifact pair"
        );
        Ok(pipeline)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Ok(handle) = fs::File::open(dir) {
        let _ = handle.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

#[cfg(test)]
mod tests;
