use crate::config::ClassifierConfig;
use crate::error::{Result, VeracityError};
use crate::primitives::SparseVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Rows per gradient chunk. Fixed so the reduction order never depends on
/// the thread count.
const GRADIENT_CHUNK: usize = 512;

/// Numerically stable sigmoid: σ(z) = 1 / (1 + e^(-z)).
#[must_use]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Logistic Regression trainer for binary classification.
///
/// Minimizes the class-weighted mean log-loss plus `||w||² / (2·C·n)` with
/// full-batch Nesterov gradient descent. Class weights are
/// `n / (2·n_c)`, so each class contributes equally regardless of balance.
/// The intercept is not regularized.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticRegression {
    config: ClassifierConfig,
}

impl LogisticRegression {
    /// Creates a trainer with default parameters (`C = 0.1`,
    /// `max_iter = 2000`, `tol = 1e-4`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a trainer from configuration.
    #[must_use]
    pub fn from_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Sets the inverse regularization strength.
    #[must_use]
    pub fn with_c(mut self, c: f64) -> Self {
        self.config = self.config.with_c(c);
        self
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.config = self.config.with_max_iter(max_iter);
        self
    }

    /// Sets the convergence tolerance on the max-abs gradient.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.config = self.config.with_tolerance(tol);
        self
    }

    /// Fits the model to training data.
    ///
    /// # Arguments
    ///
    /// * `x` - Feature vectors, all of the same dimension
    /// * `y` - Binary labels, 1 = authentic, 0 = fabricated
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes disagree, the input is empty, a label
    /// is not 0 or 1, one class is absent, or the configuration is invalid.
    pub fn fit(&self, x: &[SparseVector], y: &[usize]) -> Result<ModelState> {
        self.config.validate()?;

        let n_samples = x.len();
        if n_samples != y.len() {
            return Err("Number of samples in X and y must match".into());
        }
        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }
        let n_features = x[0].dim();
        if x.iter().any(|row| row.dim() != n_features) {
            return Err("All feature vectors must have the same dimension".into());
        }
        if y.iter().any(|&label| label > 1) {
            return Err("Labels must be 0 or 1 for binary classification".into());
        }

        let n_positive = y.iter().filter(|&&label| label == 1).count();
        let n_negative = n_samples - n_positive;
        if n_positive == 0 || n_negative == 0 {
            return Err(VeracityError::InvalidInput(format!(
                "Both classes must be present (fabricated={n_negative}, authentic={n_positive})"
            )));
        }

        let n = n_samples as f64;
        let class_weights = [n / (2.0 * n_negative as f64), n / (2.0 * n_positive as f64)];
        let sample_weights: Vec<f64> = y.iter().map(|&label| class_weights[label]).collect();
        let lambda = 1.0 / (self.config.c * n);

        // Lipschitz bound of the gradient: σ' <= 1/4 and the intercept acts
        // as a constant feature of value 1.
        let max_sq_norm = x
            .iter()
            .map(|row| row.norm().powi(2))
            .fold(0.0_f64, f64::max);
        let mean_weight = sample_weights.iter().sum::<f64>() / n;
        let lipschitz = 0.25 * mean_weight * (1.0 + max_sq_norm) + lambda;
        let step = 1.0 / lipschitz;

        let kappa_sqrt = (lipschitz / lambda).sqrt();
        let momentum = (kappa_sqrt - 1.0) / (kappa_sqrt + 1.0);

        let problem = Problem {
            x,
            y,
            sample_weights: &sample_weights,
            lambda,
            n_features,
        };

        // Parameter layout: weights followed by the intercept.
        let mut current = vec![0.0; n_features + 1];
        let mut previous = current.clone();
        let mut n_iter = 0;
        let mut converged = false;

        for _ in 0..self.config.max_iter {
            n_iter += 1;

            let lookahead: Vec<f64> = current
                .iter()
                .zip(&previous)
                .map(|(c, p)| c + momentum * (c - p))
                .collect();

            let grad = problem.gradient(&lookahead);
            let max_abs = grad.iter().fold(0.0_f64, |acc, g| acc.max(g.abs()));
            if max_abs < self.config.tol {
                current = lookahead;
                converged = true;
                break;
            }

            previous = std::mem::replace(
                &mut current,
                lookahead
                    .iter()
                    .zip(&grad)
                    .map(|(v, g)| v - step * g)
                    .collect(),
            );
        }

        let bias = current.pop().unwrap_or(0.0);

        Ok(ModelState {
            weights: current,
            bias,
            class_weights,
            config: self.config,
            n_iter,
            converged,
        })
    }
}

/// Borrowed training data plus the derived constants of the objective.
struct Problem<'a> {
    x: &'a [SparseVector],
    y: &'a [usize],
    sample_weights: &'a [f64],
    lambda: f64,
    n_features: usize,
}

impl Problem<'_> {
    /// Gradient of the objective at `params` (weights then intercept).
    fn gradient(&self, params: &[f64]) -> Vec<f64> {
        let (weights, bias) = params.split_at(self.n_features);
        let bias = bias[0];

        let partials: Vec<Vec<f64>> = self
            .x
            .par_chunks(GRADIENT_CHUNK)
            .zip(self.y.par_chunks(GRADIENT_CHUNK))
            .zip(self.sample_weights.par_chunks(GRADIENT_CHUNK))
            .map(|((rows, labels), weights_chunk)| {
                let mut grad = vec![0.0; self.n_features + 1];
                for ((row, &label), &sw) in rows.iter().zip(labels).zip(weights_chunk) {
                    let error = sw * (sigmoid(bias + row.dot_dense(weights)) - label as f64);
                    for (j, v) in row.iter() {
                        grad[j] += error * v;
                    }
                    grad[self.n_features] += error;
                }
                grad
            })
            .collect();

        let n = self.x.len() as f64;
        let mut total = vec![0.0; self.n_features + 1];
        for partial in &partials {
            for (t, p) in total.iter_mut().zip(partial) {
                *t += p;
            }
        }
        for (j, t) in total.iter_mut().enumerate() {
            *t /= n;
            if j < self.n_features {
                *t += self.lambda * weights[j];
            }
        }
        total
    }
}

/// Fitted logistic regression parameters. Read-only after training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    weights: Vec<f64>,
    bias: f64,
    class_weights: [f64; 2],
    config: ClassifierConfig,
    n_iter: usize,
    converged: bool,
}

impl ModelState {
    /// Decision value `bias + Σ w_i·x_i`.
    #[must_use]
    pub fn logit(&self, x: &SparseVector) -> f64 {
        self.bias + x.dot_dense(&self.weights)
    }

    /// Class probabilities `(p_fabricated, p_authentic)`; they sum to 1.
    #[must_use]
    pub fn predict_proba(&self, x: &SparseVector) -> (f64, f64) {
        let p1 = sigmoid(self.logit(x));
        (1.0 - p1, p1)
    }

    /// Predicted label: 1 when `p_authentic >= 0.5`.
    #[must_use]
    pub fn predict(&self, x: &SparseVector) -> usize {
        usize::from(self.predict_proba(x).1 >= 0.5)
    }

    /// Authentic-class probability for each row.
    #[must_use]
    pub fn predict_proba_batch(&self, x: &[SparseVector]) -> Vec<f64> {
        x.iter().map(|row| self.predict_proba(row).1).collect()
    }

    /// Per-feature contribution `w_i·x_i` to the logit.
    #[must_use]
    pub fn contributions(&self, x: &SparseVector) -> Vec<(usize, f64)> {
        x.iter()
            .filter_map(|(i, v)| self.weights.get(i).map(|w| (i, w * v)))
            .collect()
    }

    /// Coefficients indexed by feature; positive values lean authentic.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Intercept term.
    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Class-balance weights `[fabricated, authentic]` used during fitting.
    #[must_use]
    pub fn class_weights(&self) -> [f64; 2] {
        self.class_weights
    }

    /// Hyperparameters the model was fitted with.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Number of features the model expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Iterations run during fitting.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Whether the gradient tolerance was reached before `max_iter`.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }
}
