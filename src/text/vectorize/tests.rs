pub(crate) use super::*;

#[test]
fn test_tfidf_vectorizer_basic() {
    let docs = ["hello world", "hello rust", "world programming"];

    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");
    let vectors = state.transform(&docs);

    assert_eq!(vectors.len(), 3);
    assert_eq!(state.vocabulary_size(), 4);
    for v in &vectors {
        assert_eq!(v.dim(), 4);
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_vocabulary_ordered_by_frequency_then_lexicographic() {
    let docs = ["zeta alpha alpha", "beta zeta", "gamma"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    // alpha=2, zeta=2, beta=1, gamma=1
    assert_eq!(state.feature_names(), ["alpha", "zeta", "beta", "gamma"]);
    assert_eq!(state.index_of("zeta"), Some(1));
    assert_eq!(state.index_of("missing"), None);
}

#[test]
fn test_max_features_limits_vocabulary() {
    let docs = ["alien alien alien base base secret"];
    let state = TfidfVectorizer::new()
        .with_max_features(2)
        .fit(&docs)
        .expect("fit should succeed");

    assert_eq!(state.feature_names(), ["alien", "base"]);
    assert_eq!(state.max_features(), 2);
}

#[test]
fn test_extended_stop_words_excluded() {
    let docs = ["alien besides base", "whereupon alien"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    assert!(state.index_of("besides").is_none());
    assert!(state.index_of("whereupon").is_none());
    assert!(state.index_of("alien").is_some());
}

#[test]
fn test_smoothed_idf() {
    let docs = ["cat dog", "cat", "cat bird"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    let cat = state.index_of("cat").expect("cat in vocabulary");
    let dog = state.index_of("dog").expect("dog in vocabulary");

    // cat appears in all docs: ln(4/4) + 1 = 1
    assert!((state.idf()[cat] - 1.0).abs() < 1e-12);
    // dog appears in one doc: ln(4/2) + 1
    let expected = (4.0_f64 / 2.0).ln() + 1.0;
    assert!((state.idf_at(dog).expect("idf") - expected).abs() < 1e-12);
    assert_eq!(state.n_documents(), 3);
}

#[test]
fn test_rare_terms_weigh_more() {
    let docs = ["common rare", "common", "common"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    let v = state.transform_one("common rare");
    let common = state.index_of("common").expect("common");
    let rare = state.index_of("rare").expect("rare");
    assert!(v.get(rare) > v.get(common));
}

#[test]
fn test_unknown_tokens_map_to_zero_vector() {
    let docs = ["alien base"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    let v = state.transform_one("completely unseen words");
    assert!(v.is_zero());
    assert_eq!(v.dim(), state.vocabulary_size());

    let empty = state.transform_one("");
    assert!(empty.is_zero());
}

#[test]
fn test_term_counts_accumulate() {
    let docs = ["alien base", "base"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    let once = state.transform_one("alien base");
    let twice = state.transform_one("alien alien base");
    let alien = state.index_of("alien").expect("alien");
    assert!(twice.get(alien) > once.get(alien));
}

#[test]
fn test_transform_is_pure() {
    let docs = ["alien base secret", "secret vaccine"];
    let state = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");

    assert_eq!(
        state.transform_one("secret alien"),
        state.transform_one("secret alien")
    );
}

#[test]
fn test_fit_is_deterministic() {
    let docs = ["b a c", "c a", "d e f a"];
    let first = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");
    let second = TfidfVectorizer::new().fit(&docs).expect("fit should succeed");
    assert_eq!(first, second);
}

#[test]
fn test_empty_corpus_error() {
    let docs: Vec<&str> = vec![];
    assert!(TfidfVectorizer::new().fit(&docs).is_err());
}

#[test]
fn test_empty_vocabulary_error() {
    let docs = ["", "   "];
    assert!(TfidfVectorizer::new().fit(&docs).is_err());
}

#[test]
fn test_zero_max_features_error() {
    let docs = ["alien base"];
    let result = TfidfVectorizer::new().with_max_features(0).fit(&docs);
    assert!(matches!(
        result,
        Err(crate::error::VeracityError::InvalidHyperparameter { .. })
    ));
}

#[test]
fn test_from_config() {
    let config = crate::config::VectorizerConfig::default().with_max_features(1);
    let state = TfidfVectorizer::from_config(&config)
        .fit(&["alien alien base"])
        .expect("fit should succeed");
    assert_eq!(state.feature_names(), ["alien"]);
}
