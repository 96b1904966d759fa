pub(crate) use super::*;

fn vector(dim: usize, pairs: Vec<(usize, f64)>) -> SparseVector {
    SparseVector::from_pairs(dim, pairs).expect("valid sparse vector")
}

#[test]
fn test_cosine_similarity_identical() {
    let v = vector(3, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
    let sim = cosine_similarity(&v, &v).expect("should succeed");
    assert!((sim - 1.0).abs() < 1e-10);
}

#[test]
fn test_cosine_similarity_orthogonal() {
    let v1 = vector(3, vec![(0, 1.0)]);
    let v2 = vector(3, vec![(1, 1.0)]);
    let sim = cosine_similarity(&v1, &v2).expect("should succeed");
    assert!(sim.abs() < 1e-10);
}

#[test]
fn test_cosine_similarity_zero_vector() {
    let v1 = SparseVector::zeros(3);
    let v2 = vector(3, vec![(1, 1.0)]);
    assert_eq!(cosine_similarity(&v1, &v2).expect("should succeed"), 0.0);
}

#[test]
fn test_cosine_similarity_dimension_mismatch() {
    let v1 = vector(3, vec![(0, 1.0)]);
    let v2 = vector(4, vec![(0, 1.0)]);
    assert!(cosine_similarity(&v1, &v2).is_err());
}

#[test]
fn test_cosine_similarity_scale_invariant() {
    let v1 = vector(2, vec![(0, 1.0), (1, 1.0)]);
    let v2 = vector(2, vec![(0, 5.0), (1, 5.0)]);
    let sim = cosine_similarity(&v1, &v2).expect("should succeed");
    assert!((sim - 1.0).abs() < 1e-10);
}

#[test]
fn test_top_k_similar_orders_descending() {
    let query = vector(3, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
    let docs = vec![
        vector(3, vec![(0, 2.0), (1, 3.0), (2, 4.0)]),
        vector(3, vec![(2, 1.0)]),
        vector(3, vec![(0, 1.0), (1, 2.0), (2, 2.9)]),
    ];

    let top = top_k_similar(&query, &docs, 3, 0.0);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].0, 2);
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn test_top_k_similar_threshold() {
    let query = vector(2, vec![(0, 1.0)]);
    let docs = vec![vector(2, vec![(1, 1.0)]), vector(2, vec![(0, 1.0)])];

    let top = top_k_similar(&query, &docs, 5, 0.08);
    assert_eq!(top, vec![(1, 1.0)]);
}

#[test]
fn test_top_k_similar_ties_keep_index_order() {
    let query = vector(2, vec![(0, 1.0)]);
    let docs = vec![
        vector(2, vec![(0, 1.0)]),
        vector(2, vec![(0, 2.0)]),
        vector(2, vec![(0, 3.0)]),
    ];

    let top = top_k_similar(&query, &docs, 2, 0.0);
    let indices: Vec<usize> = top.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_top_k_similar_empty() {
    let query = vector(2, vec![(0, 1.0)]);
    assert!(top_k_similar(&query, &[], 5, 0.0).is_empty());
    assert!(top_k_similar(&query, &[query.clone()], 0, 0.0).is_empty());
}
