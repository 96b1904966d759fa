//! Binary classification.
//!
//! [`LogisticRegression`] fits class-balanced, L2-regularized logistic
//! regression over sparse TF-IDF features and returns an immutable
//! [`ModelState`].
//!
//! # Example
//!
//! ```
//! use veracity::classification::LogisticRegression;
//! use veracity::primitives::SparseVector;
//!
//! let x = vec![
//!     SparseVector::from_pairs(2, vec![(0, 1.0)]).expect("valid"),
//!     SparseVector::from_pairs(2, vec![(0, 1.0)]).expect("valid"),
//!     SparseVector::from_pairs(2, vec![(1, 1.0)]).expect("valid"),
//! ];
//! let y = vec![1, 1, 0];
//!
//! let model = LogisticRegression::new()
//!     .with_c(10.0)
//!     .fit(&x, &y)
//!     .expect("Training data is valid");
//!
//! let (p0, p1) = model.predict_proba(&x[0]);
//! assert!((p0 + p1 - 1.0).abs() < 1e-12);
//! assert!(p1 > 0.5);
//! ```

mod logistic;

pub use logistic::{sigmoid, LogisticRegression, ModelState};

#[cfg(test)]
mod tests;
