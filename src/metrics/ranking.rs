//! Ranking metrics for scored binary predictions.

use std::cmp::Ordering;

/// Area under the ROC curve.
///
/// Computed as the Mann-Whitney U statistic over the scores: the
/// probability that a random positive (label 1) outranks a random negative
/// (label 0). Tied scores receive their average rank, so ties count half.
///
/// Returns `None` when either class is absent or the slices differ in length.
///
/// # Examples
///
/// ```
/// use veracity::metrics::ranking::roc_auc;
///
/// let y_true = vec![0, 0, 1, 1];
/// let scores = vec![0.1, 0.4, 0.35, 0.8];
/// let auc = roc_auc(&scores, &y_true).expect("both classes present");
/// assert!((auc - 0.75).abs() < 1e-12);
/// ```
#[must_use]
pub fn roc_auc(scores: &[f64], y_true: &[usize]) -> Option<f64> {
    if scores.len() != y_true.len() {
        return None;
    }

    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    // Sum of 1-based average ranks of the positives.
    let mut rank_sum = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        let average_rank = (start + end + 1) as f64 / 2.0;
        let positives = order[start..end]
            .iter()
            .filter(|&&i| y_true[i] == 1)
            .count();
        rank_sum += average_rank * positives as f64;
        start = end;
    }

    let (p, n) = (n_pos as f64, n_neg as f64);
    Some((rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}
