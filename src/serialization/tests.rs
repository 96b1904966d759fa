use super::*;
use crate::classification::LogisticRegression;
use crate::text::normalize::normalize;
use crate::text::vectorize::TfidfVectorizer;

fn fitted(docs: &[&str]) -> FittedPipeline {
    let normalized: Vec<String> = docs.iter().map(|d| normalize(d)).collect();
    let labels: Vec<usize> = (0..docs.len()).map(|i| i % 2).collect();
    let vectorizer = TfidfVectorizer::new().fit(&normalized).expect("fit");
    let x = vectorizer.transform(&normalized);
    let model = LogisticRegression::new().fit(&x, &labels).expect("fit");
    FittedPipeline::new(vectorizer, model).expect("pair")
}

fn run_a() -> FittedPipeline {
    fitted(&["secret alien invasion", "official climate report"])
}

fn run_b() -> FittedPipeline {
    fitted(&["magic pill cure", "solar energy research"])
}

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    let pipeline = run_a();

    store.save(&pipeline).expect("save");
    assert!(store.exists());

    let loaded = store.load().expect("load");
    assert_eq!(loaded, pipeline);
}

#[test]
fn test_save_leaves_no_temporaries() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    store.save(&run_a()).expect("save");

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec![MODEL_FILE, VECTORIZER_FILE]);
}

#[test]
fn test_save_creates_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path().join("nested").join("models"));
    store.save(&run_a()).expect("save");
    assert!(store.exists());
}

#[test]
fn test_missing_artifacts_are_model_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    assert!(!store.exists());
    assert!(matches!(
        store.load(),
        Err(VeracityError::ModelUnavailable { .. })
    ));

    store.save(&run_a()).expect("save");
    fs::remove_file(store.model_path()).expect("remove");
    assert!(matches!(
        store.load(),
        Err(VeracityError::ModelUnavailable { .. })
    ));
}

#[test]
fn test_mixed_runs_are_mismatch() {
    let dir_a = tempfile::tempdir().expect("temp dir");
    let dir_b = tempfile::tempdir().expect("temp dir");
    let store_a = ArtifactStore::new(dir_a.path());
    let store_b = ArtifactStore::new(dir_b.path());
    store_a.save(&run_a()).expect("save");
    store_b.save(&run_b()).expect("save");

    fs::copy(store_b.model_path(), store_a.model_path()).expect("copy");

    match store_a.load() {
        Err(VeracityError::ArtifactMismatch { vectorizer, model }) => {
            assert_eq!(vectorizer, run_a().pair_id());
            assert_eq!(model, run_b().pair_id());
        }
        other => panic!("expected ArtifactMismatch, got {other:?}"),
    }
}

#[test]
fn test_flipped_payload_byte_is_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    store.save(&run_a()).expect("save");

    let path = store.vectorizer_path();
    let mut bytes = fs::read(&path).expect("read");
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, bytes).expect("write");

    assert!(matches!(
        store.load(),
        Err(VeracityError::CorruptArtifact { .. })
    ));
}

#[test]
fn test_bad_magic_is_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    store.save(&run_a()).expect("save");
    fs::write(store.model_path(), b"not an artifact at all").expect("write");

    assert!(matches!(
        store.load(),
        Err(VeracityError::CorruptArtifact { .. })
    ));
}

#[test]
fn test_truncated_file_is_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    store.save(&run_a()).expect("save");

    let bytes = fs::read(store.model_path()).expect("read");
    fs::write(store.model_path(), &bytes[..HEADER_LEN + 3]).expect("write");

    assert!(matches!(
        store.load(),
        Err(VeracityError::CorruptArtifact { .. })
    ));
}

#[test]
fn test_swapped_files_are_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    store.save(&run_a()).expect("save");

    let vectorizer = fs::read(store.vectorizer_path()).expect("read");
    let model = fs::read(store.model_path()).expect("read");
    fs::write(store.vectorizer_path(), model).expect("write");
    fs::write(store.model_path(), vectorizer).expect("write");

    assert!(matches!(
        store.load(),
        Err(VeracityError::CorruptArtifact { .. })
    ));
}

#[test]
fn test_unsupported_version_is_corrupt() {
    let payload = encode_payload(&42u32).expect("encode");
    let mut bytes =
        encode_artifact(ArtifactKind::Model, "0123456789abcdef", &payload).expect("encode");
    bytes[4..8].copy_from_slice(&(VERSION + 1).to_le_bytes());

    let result = decode_artifact(&bytes, Path::new("model.bin"), ArtifactKind::Model);
    assert!(matches!(
        result,
        Err(VeracityError::CorruptArtifact { reason, .. }) if reason.contains("version")
    ));
}

#[test]
fn test_header_layout() {
    let payload = vec![7u8; 10];
    let bytes =
        encode_artifact(ArtifactKind::Vectorizer, "0123456789abcdef", &payload).expect("encode");

    assert_eq!(&bytes[0..4], MAGIC);
    assert_eq!(bytes.len(), HEADER_LEN + payload.len());

    let artifact = decode_artifact(&bytes, Path::new("v.bin"), ArtifactKind::Vectorizer)
        .expect("decodes");
    assert_eq!(artifact.pair_id, "0123456789abcdef");
    assert_eq!(artifact.payload, payload.as_slice());
}

#[test]
fn test_bad_pair_id_rejected_on_encode() {
    assert!(encode_artifact(ArtifactKind::Model, "short", &[]).is_err());
}

#[test]
fn test_pair_id_depends_on_both_payloads() {
    let id = pair_id(b"abc", b"def");
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(id, pair_id(b"abc", b"deg"));
    assert_ne!(id, pair_id(b"abd", b"def"));
    // Length prefixes keep the boundary significant.
    assert_ne!(pair_id(b"ab", b"cdef"), pair_id(b"abc", b"def"));
}
