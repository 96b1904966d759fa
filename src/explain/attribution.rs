//! Token-level Shapley attribution under a text-masking model.
//!
//! Players are the normalized token positions of an input. The value of a
//! coalition is the classifier logit of the text formed by its tokens, so
//! the empty coalition is worth the bias. Shapley values are estimated by
//! averaging marginal contributions over seeded random orderings:
//!
//! ```text
//! phi_i = (1/P) * sum_p [ v(pre_p(i) + {i}) - v(pre_p(i)) ]
//! ```
//!
//! Each ordering telescopes from the bias to the full logit, so the
//! estimates always sum to `logit - bias`.
//!
//! Adding one occurrence of vocabulary term `j` (weight `w`, idf `g`, prior
//! count `c`) to a coalition updates its unnormalized dot product and
//! squared norm in constant time:
//!
//! ```text
//! dot   += w * g
//! sumsq += (2c + 1) * g^2
//! v      = bias + dot / sqrt(sumsq)
//! ```

use crate::config::AttributionConfig;
use crate::error::{Result, VeracityError};
use crate::model_selection::shuffle_indices;
use crate::pipeline::FittedPipeline;
use crate::text::normalize::normalized_tokens;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Attribution of one token position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenContribution {
    /// Position among the normalized tokens
    pub position: usize,
    /// Normalized token
    pub token: String,
    /// Estimated Shapley value in logit units; positive leans authentic
    pub contribution: f64,
}

/// A completed attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Per-position contributions in input order
    pub tokens: Vec<TokenContribution>,
    /// Per-token sums ranked by magnitude, at most `top_k` entries
    pub top_tokens: Vec<(String, f64)>,
    /// Logit of the fully masked input (the classifier bias)
    pub base_value: f64,
    /// Logit of the full input
    pub logit: f64,
    /// Authentic-class probability of the full input
    pub p_authentic: f64,
    /// Orderings sampled
    pub permutations: usize,
}

impl Attribution {
    /// Sum of all contributions; equals `logit - base_value` up to rounding.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tokens.iter().map(|t| t.contribution).sum()
    }

    /// Contributions summed per distinct token, largest magnitude first.
    #[must_use]
    pub fn by_token(&self) -> Vec<(String, f64)> {
        let mut sums: HashMap<&str, f64> = HashMap::new();
        for t in &self.tokens {
            *sums.entry(t.token.as_str()).or_insert(0.0) += t.contribution;
        }
        let mut ranked: Vec<(String, f64)> = sums
            .into_iter()
            .map(|(token, c)| (token.to_string(), c))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked
    }
}

/// Outcome of a local explanation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocalAttribution {
    /// Attribution succeeded
    Attributed(Attribution),
    /// Attribution could not be produced for this input
    Unavailable {
        /// Human-readable cause
        reason: String,
    },
}

impl LocalAttribution {
    /// The attribution, if one was produced.
    #[must_use]
    pub fn attribution(&self) -> Option<&Attribution> {
        match self {
            Self::Attributed(a) => Some(a),
            Self::Unavailable { .. } => None,
        }
    }

    /// Whether an attribution was produced.
    #[must_use]
    pub fn is_attributed(&self) -> bool {
        matches!(self, Self::Attributed(_))
    }
}

/// A token resolved against the fitted vocabulary.
#[derive(Debug, Clone, Copy)]
struct Player {
    /// Dense slot among the input's distinct in-vocabulary terms
    slot: usize,
    weight: f64,
    idf: f64,
}

/// Monte Carlo permutation Shapley estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAttributor {
    config: AttributionConfig,
}

impl TokenAttributor {
    /// Attributor with default settings (128 orderings, seed 42).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributor from configuration.
    #[must_use]
    pub fn from_config(config: AttributionConfig) -> Self {
        Self { config }
    }

    /// Sets the number of sampled orderings.
    #[must_use]
    pub fn with_permutations(mut self, permutations: usize) -> Self {
        self.config.permutations = permutations;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    /// Attribute the pipeline's logit for `raw` to its tokens.
    ///
    /// # Errors
    ///
    /// Returns [`VeracityError::ExplanationUnavailable`] when the input has
    /// no tokens after normalization, exceeds the token cap, the sampler is
    /// configured with zero orderings, or the estimate is not finite.
    pub fn attribute(&self, pipeline: &FittedPipeline, raw: &str) -> Result<Attribution> {
        let unavailable = |reason: String| VeracityError::ExplanationUnavailable { reason };

        if self.config.permutations == 0 {
            return Err(unavailable("permutation count is zero".to_string()));
        }

        let tokens = normalized_tokens(raw);
        if tokens.is_empty() {
            return Err(unavailable(
                "no attributable tokens after normalization".to_string(),
            ));
        }
        if tokens.len() > self.config.max_tokens {
            return Err(unavailable(format!(
                "{} tokens exceed the attribution cap of {}",
                tokens.len(),
                self.config.max_tokens
            )));
        }

        let (players, n_slots) = resolve_players(pipeline, &tokens);
        let bias = pipeline.model().bias();
        let n = tokens.len();
        let seed = self.config.seed;

        let per_permutation: Vec<Vec<f64>> = (0..self.config.permutations)
            .into_par_iter()
            .map(|p| {
                let order = shuffle_indices(n, seed.wrapping_add(p as u64));
                marginals(&players, n_slots, bias, &order)
            })
            .collect();

        let mut phi = vec![0.0; n];
        for marginal in &per_permutation {
            for (acc, m) in phi.iter_mut().zip(marginal) {
                *acc += m;
            }
        }
        let scale = 1.0 / self.config.permutations as f64;
        for value in &mut phi {
            *value *= scale;
        }

        if phi.iter().any(|v| !v.is_finite()) {
            return Err(unavailable("attribution produced non-finite values".to_string()));
        }

        let features = pipeline.vectorizer().transform_one(&tokens.join(" "));
        let logit = pipeline.model().logit(&features);
        let (_, p_authentic) = pipeline.model().predict_proba(&features);

        let mut attribution = Attribution {
            tokens: tokens
                .into_iter()
                .zip(phi)
                .enumerate()
                .map(|(position, (token, contribution))| TokenContribution {
                    position,
                    token,
                    contribution,
                })
                .collect(),
            top_tokens: Vec::new(),
            base_value: bias,
            logit,
            p_authentic,
            permutations: self.config.permutations,
        };
        attribution.top_tokens = attribution
            .by_token()
            .into_iter()
            .take(self.config.top_k)
            .collect();
        Ok(attribution)
    }

    /// Attribute `raw`, folding every failure into
    /// [`LocalAttribution::Unavailable`].
    #[must_use]
    pub fn explain(&self, pipeline: &FittedPipeline, raw: &str) -> LocalAttribution {
        match self.attribute(pipeline, raw) {
            Ok(attribution) => LocalAttribution::Attributed(attribution),
            Err(VeracityError::ExplanationUnavailable { reason }) => {
                LocalAttribution::Unavailable { reason }
            }
            Err(other) => LocalAttribution::Unavailable {
                reason: other.to_string(),
            },
        }
    }
}

/// Look up each token; out-of-vocabulary tokens are inert players.
fn resolve_players(pipeline: &FittedPipeline, tokens: &[String]) -> (Vec<Option<Player>>, usize) {
    let vectorizer = pipeline.vectorizer();
    let weights = pipeline.model().weights();
    let mut slots: HashMap<usize, usize> = HashMap::new();

    let players = tokens
        .iter()
        .map(|token| {
            let index = vectorizer.index_of(token)?;
            let idf = vectorizer.idf_at(index)?;
            let weight = *weights.get(index)?;
            let next = slots.len();
            let slot = *slots.entry(index).or_insert(next);
            Some(Player { slot, weight, idf })
        })
        .collect();
    (players, slots.len())
}

/// Marginal contribution of every position along one ordering.
fn marginals(players: &[Option<Player>], n_slots: usize, bias: f64, order: &[usize]) -> Vec<f64> {
    let mut counts = vec![0u32; n_slots];
    let mut dot = 0.0;
    let mut sumsq = 0.0;
    let mut value = bias;
    let mut out = vec![0.0; players.len()];

    for &position in order {
        let Some(player) = players[position] else {
            continue;
        };
        let count = &mut counts[player.slot];
        dot += player.weight * player.idf;
        sumsq += f64::from(2 * *count + 1) * player.idf * player.idf;
        *count += 1;

        let next = if sumsq > 0.0 {
            bias + dot / sumsq.sqrt()
        } else {
            bias
        };
        out[position] = next - value;
        value = next;
    }
    out
}

#[cfg(test)]
#[path = "attribution_tests.rs"]
mod tests;
