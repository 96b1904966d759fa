//! Seeded train/test splitting and sampling.
//!
//! All randomness goes through `StdRng::seed_from_u64`, so the same seed
//! always yields the same split on every platform.
//!
//! # Example
//!
//! ```
//! use veracity::model_selection::train_test_split;
//!
//! let items: Vec<u32> = (0..20).collect();
//! let (train, test) = train_test_split(&items, 0.15, 44).expect("valid split");
//! assert_eq!(train.len(), 17);
//! assert_eq!(test.len(), 3);
//! ```

use crate::error::{Result, VeracityError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A permutation of `0..n_samples` drawn from `seed`.
#[must_use]
pub fn shuffle_indices(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Up to `k` distinct indices from `0..n_samples`, drawn from `seed`.
///
/// When `k >= n_samples` every index is returned in ascending order.
#[must_use]
pub fn sample_indices(n_samples: usize, k: usize, seed: u64) -> Vec<usize> {
    if k >= n_samples {
        return (0..n_samples).collect();
    }
    let mut indices = shuffle_indices(n_samples, seed);
    indices.truncate(k);
    indices
}

fn validate_split(n_samples: usize, test_size: f64) -> Result<(usize, usize)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(VeracityError::invalid_hyperparameter(
            "test_size",
            test_size,
            "in (0, 1)",
        ));
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(VeracityError::InvalidInput(format!(
            "Split would result in empty train or test set (n_train={n_train}, n_test={n_test})"
        )));
    }

    Ok((n_train, n_test))
}

/// Shuffled `(train, test)` index sets; the test set holds
/// `ceil(n_samples * test_size)` indices.
///
/// # Errors
///
/// Returns an error if `test_size` is outside `(0, 1)` or either side
/// would be empty.
pub fn train_test_split_indices(
    n_samples: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let (n_train, _) = validate_split(n_samples, test_size)?;
    let mut train = shuffle_indices(n_samples, seed);
    let test = train.split_off(n_train);
    Ok((train, test))
}

/// Split `items` into shuffled `(train, test)` copies.
///
/// # Errors
///
/// See [`train_test_split_indices`].
pub fn train_test_split<T: Clone>(items: &[T], test_size: f64, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    let (train_idx, test_idx) = train_test_split_indices(items.len(), test_size, seed)?;
    let gather = |indices: &[usize]| indices.iter().map(|&i| items[i].clone()).collect();
    Ok((gather(&train_idx), gather(&test_idx)))
}
