//! End-to-end tests: corpus files on disk, training, persistence, and the
//! detector facade.

use std::fs;
use veracity::config::VeracityConfig;
use veracity::corpus::{Corpus, Document, Label, AUTHENTIC_FILE, FABRICATED_FILE};
use veracity::detector::Detector;
use veracity::error::VeracityError;
use veracity::explain::{Assessment, LocalAttribution, BENCHMARK_MESSAGE};
use veracity::serialization::ArtifactStore;
use veracity::training::Trainer;

const FAKE: &str = "A leaked document from a secret underground base claims aliens will invade next Tuesday";
const REAL: &str = "Researchers have developed a new solar cell that is more efficient than current technologies";

fn trained_detector(dir: &std::path::Path) -> Detector {
    let data = dir.join("data");
    let models = dir.join("models");
    Corpus::write_sample(&data).expect("writes sample");
    let corpus = Corpus::load(&data).expect("loads sample");
    Trainer::new()
        .train_and_save(&corpus, &ArtifactStore::new(&models))
        .expect("trains");
    Detector::load(&models).expect("loads artifacts")
}

#[test]
fn test_sample_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (authentic, fabricated) = Corpus::write_sample(dir.path()).expect("writes");
    assert!(authentic.ends_with(AUTHENTIC_FILE));
    assert!(fabricated.ends_with(FABRICATED_FILE));

    let corpus = Corpus::load(dir.path()).expect("loads");
    assert_eq!(corpus.len(), 300);
    assert_eq!(corpus.count(Label::Authentic), 150);
    assert_eq!(corpus.count(Label::Fabricated), 150);
}

#[test]
fn test_missing_training_data() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Corpus::load(dir.path()).unwrap_err();
    assert!(matches!(err, VeracityError::TrainingDataMissing { .. }));
}

#[test]
fn test_full_workflow() {
    let dir = tempfile::tempdir().expect("temp dir");
    let detector = trained_detector(dir.path());
    assert!(detector.is_online());

    let (p_fake, _) = detector.predict(FAKE).expect("predicts");
    let (_, p_real) = detector.predict(REAL).expect("predicts");
    assert!(p_fake > 0.5);
    assert!(p_real > 0.5);

    let local = detector.get_local_explanation(&[FAKE, REAL]);
    assert_eq!(local.len(), 2);
    for result in &local {
        match result {
            LocalAttribution::Attributed(a) => {
                assert!((a.total() - (a.logit - a.base_value)).abs() < 1e-9);
            }
            LocalAttribution::Unavailable { reason } => panic!("unavailable: {reason}"),
        }
    }

    let (markers, triggers) = detector.get_global_importance().expect("online");
    assert_eq!(markers.len(), triggers.len());
    assert!(markers[0].1 > 0.0);
    assert!(triggers[0].1 < 0.0);

    let corpus = Corpus::sample();
    let related = detector.get_related_intel(FAKE, &corpus).expect("online");
    assert_eq!(related[0].title, "Alien Invasion Imminent Says Top Secret Source");
    assert_eq!(related[0].label, Label::Fabricated);
}

#[test]
fn test_predict_rejects_short_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let detector = trained_detector(dir.path());
    assert!(matches!(
        detector.predict("aliens are here"),
        Err(VeracityError::InputTooShort {
            words: 3,
            min_words: 5
        })
    ));
}

#[test]
fn test_reloaded_detector_agrees() {
    let dir = tempfile::tempdir().expect("temp dir");
    let first = trained_detector(dir.path());
    let second = Detector::load(dir.path().join("models")).expect("reloads");
    assert_eq!(
        first.predict(FAKE).expect("predicts"),
        second.predict(FAKE).expect("predicts")
    );
}

#[test]
fn test_mixed_training_runs_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let run_a = ArtifactStore::new(dir.path().join("a"));
    let run_b = ArtifactStore::new(dir.path().join("b"));

    Trainer::new()
        .train_and_save(&Corpus::sample(), &run_a)
        .expect("trains");
    let mut docs = Corpus::sample().documents().to_vec();
    docs.push(Document::new(
        "Extra",
        "Parliament approved the infrastructure budget",
        Label::Authentic,
    ));
    Trainer::new()
        .train_and_save(&Corpus::new(docs), &run_b)
        .expect("trains");

    fs::copy(run_b.model_path(), run_a.model_path()).expect("copies");
    assert!(matches!(
        Detector::load(run_a.dir()),
        Err(VeracityError::ArtifactMismatch { .. })
    ));
}

#[test]
fn test_offline_detector_still_audits() {
    let dir = tempfile::tempdir().expect("temp dir");
    let detector = Detector::load(dir.path()).expect("offline");
    assert!(!detector.is_online());
    assert!(matches!(
        detector.predict(REAL),
        Err(VeracityError::ModelUnavailable { .. })
    ));

    let suspicious = detector
        .get_linguistic_audit("BREAKING!!! Aliens ARE here???")
        .expect("audits");
    assert_eq!(suspicious.assessment, Assessment::HighlySuspicious);
    assert!(suspicious.report.len() >= 2);

    let calm = "Officials from the regional council presented the annual report on water quality. \
                The document describes testing procedures, sampling locations and seasonal trends \
                observed across the district, and it recommends further monitoring of every site during the next year.";
    let standard = detector.get_linguistic_audit(calm).expect("audits");
    assert_eq!(standard.assessment, Assessment::Standard);
    assert_eq!(standard.report, vec![BENCHMARK_MESSAGE.to_string()]);
}

#[test]
fn test_config_controls_detector() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{ "min_words": 2, "importance_top_k": 4, "audit": { "min_words": 3 } }"#,
    )
    .expect("writes config");

    let models = dir.path().join("models");
    Trainer::new()
        .train_and_save(&Corpus::sample(), &ArtifactStore::new(&models))
        .expect("trains");

    let config = VeracityConfig::from_json_file(&config_path)
        .expect("loads config")
        .with_artifacts_dir(&models);
    let detector = Detector::load_with_config(config).expect("loads");

    assert!(detector.predict("secret aliens").is_ok());
    let (markers, triggers) = detector.get_global_importance().expect("online");
    assert_eq!(markers.len(), 4);
    assert_eq!(triggers.len(), 4);
}
