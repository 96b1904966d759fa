pub(crate) use super::*;
use crate::primitives::SparseVector;

fn row(dim: usize, pairs: Vec<(usize, f64)>) -> SparseVector {
    SparseVector::from_pairs(dim, pairs)
        .expect("valid sparse vector")
        .normalized()
}

/// Feature 0 marks authentic rows, feature 1 fabricated ones, feature 2 is
/// shared noise.
fn separable_data() -> (Vec<SparseVector>, Vec<usize>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for i in 0..20 {
        let noise = 0.1 * (i % 3) as f64;
        x.push(row(3, vec![(0, 1.0), (2, noise)]));
        y.push(1);
        x.push(row(3, vec![(1, 1.0), (2, noise)]));
        y.push(0);
    }
    (x, y)
}

#[test]
fn test_sigmoid() {
    assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    assert!(sigmoid(10.0) > 0.99);
    assert!(sigmoid(-10.0) < 0.01);
    // No overflow at the extremes.
    assert!((sigmoid(1000.0) - 1.0).abs() < 1e-12);
    assert!(sigmoid(-1000.0) >= 0.0);
    assert!(sigmoid(-1000.0).is_finite());
}

#[test]
fn test_fit_separable() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new()
        .with_c(10.0)
        .fit(&x, &y)
        .expect("Training data is valid");

    for (xi, &yi) in x.iter().zip(&y) {
        assert_eq!(model.predict(xi), yi);
    }
    assert!(model.weights()[0] > 0.0);
    assert!(model.weights()[1] < 0.0);
}

#[test]
fn test_probabilities_sum_to_one() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new().fit(&x, &y).expect("valid");

    for xi in &x {
        let (p0, p1) = model.predict_proba(xi);
        assert!((0.0..=1.0).contains(&p0));
        assert!((0.0..=1.0).contains(&p1));
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_zero_vector_scores_bias() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new().fit(&x, &y).expect("valid");

    let zero = SparseVector::zeros(3);
    assert_eq!(model.logit(&zero), model.bias());
}

#[test]
fn test_class_weights_balance() {
    let x = vec![
        row(2, vec![(0, 1.0)]),
        row(2, vec![(0, 1.0)]),
        row(2, vec![(0, 1.0)]),
        row(2, vec![(1, 1.0)]),
    ];
    let y = vec![1, 1, 1, 0];
    let model = LogisticRegression::new().fit(&x, &y).expect("valid");

    let [fabricated, authentic] = model.class_weights();
    assert!((fabricated - 2.0).abs() < 1e-12);
    assert!((authentic - 4.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_balanced_weights_counter_majority_bias() {
    // Nine authentic rows and one fabricated row sharing no features: the
    // balanced objective keeps the intercept near zero.
    let mut x = vec![row(2, vec![(0, 1.0)]); 9];
    x.push(row(2, vec![(1, 1.0)]));
    let mut y = vec![1; 9];
    y.push(0);

    let model = LogisticRegression::new()
        .with_c(100.0)
        .fit(&x, &y)
        .expect("valid");
    assert_eq!(model.predict(&x[9]), 0);
    assert!(model.bias().abs() < 1.0);
}

#[test]
fn test_fit_is_deterministic() {
    let (x, y) = separable_data();
    let a = LogisticRegression::new().fit(&x, &y).expect("valid");
    let b = LogisticRegression::new().fit(&x, &y).expect("valid");
    assert_eq!(a, b);
    assert_eq!(a.weights(), b.weights());
}

#[test]
fn test_stronger_regularization_shrinks_weights() {
    let (x, y) = separable_data();
    let strong = LogisticRegression::new().with_c(0.01).fit(&x, &y).expect("valid");
    let weak = LogisticRegression::new().with_c(10.0).fit(&x, &y).expect("valid");

    let norm = |w: &[f64]| w.iter().map(|v| v * v).sum::<f64>();
    assert!(norm(strong.weights()) < norm(weak.weights()));
}

#[test]
fn test_records_hyperparameters() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new()
        .with_c(0.5)
        .with_max_iter(50)
        .with_tolerance(1e-3)
        .fit(&x, &y)
        .expect("valid");

    assert_eq!(model.config().c, 0.5);
    assert_eq!(model.config().max_iter, 50);
    assert!(model.n_iter() <= 50);
    assert_eq!(model.n_features(), 3);
}

#[test]
fn test_converges_on_easy_problem() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new().fit(&x, &y).expect("valid");
    assert!(model.converged());
    assert!(model.n_iter() < 2000);
}

#[test]
fn test_contributions_sum_to_logit_minus_bias() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new().fit(&x, &y).expect("valid");

    let sample = &x[4];
    let total: f64 = model.contributions(sample).iter().map(|(_, c)| c).sum();
    assert!((total - (model.logit(sample) - model.bias())).abs() < 1e-12);
}

#[test]
fn test_predict_proba_batch() {
    let (x, y) = separable_data();
    let model = LogisticRegression::new().fit(&x, &y).expect("valid");
    let probs = model.predict_proba_batch(&x);
    assert_eq!(probs.len(), x.len());
    assert_eq!(probs[0], model.predict_proba(&x[0]).1);
}

#[test]
fn test_fit_shape_mismatch() {
    let (x, _) = separable_data();
    assert!(LogisticRegression::new().fit(&x, &[1, 0]).is_err());
}

#[test]
fn test_fit_empty() {
    assert!(LogisticRegression::new().fit(&[], &[]).is_err());
}

#[test]
fn test_fit_invalid_labels() {
    let x = vec![row(2, vec![(0, 1.0)]), row(2, vec![(1, 1.0)])];
    assert!(LogisticRegression::new().fit(&x, &[0, 2]).is_err());
}

#[test]
fn test_fit_single_class() {
    let x = vec![row(2, vec![(0, 1.0)]), row(2, vec![(1, 1.0)])];
    assert!(LogisticRegression::new().fit(&x, &[1, 1]).is_err());
}

#[test]
fn test_fit_mixed_dimensions() {
    let x = vec![row(2, vec![(0, 1.0)]), row(3, vec![(1, 1.0)])];
    assert!(LogisticRegression::new().fit(&x, &[1, 0]).is_err());
}

#[test]
fn test_fit_invalid_c() {
    let (x, y) = separable_data();
    let result = LogisticRegression::new().with_c(0.0).fit(&x, &y);
    assert!(matches!(
        result,
        Err(crate::error::VeracityError::InvalidHyperparameter { .. })
    ));
}
