//! Core compute primitives.
//!
//! TF-IDF features are overwhelmingly zero, so the pipeline works on
//! [`SparseVector`] rather than dense storage.

mod sparse;

pub use sparse::SparseVector;
