//! Softmax weighting of aggregate scores.

use ndarray::Array1;
use pathscore_traits::{PathScoreError, Result, SENTINEL_SCORE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::weighter::Weighter;

/// Configuration for softmax weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftmaxConfig {
    /// Temperature applied to each score before exponentiation.
    ///
    /// Negative so that lower scores (better forecasts) receive more weight.
    /// Its magnitude sets how sharply weight concentrates on the best score.
    pub beta: f64,
}

impl Default for SoftmaxConfig {
    fn default() -> Self {
        Self { beta: -1.0 / 1000.0 }
    }
}

/// Weights forecasters by `exp(beta * score)`, normalized over the scored
/// entries.
///
/// The largest exponent argument is subtracted before exponentiation, so
/// scores in the thousands neither overflow nor underflow the sum. Unscored
/// entries receive weight 0. If nothing is scored every weight is 0.
///
/// # Examples
///
/// ```
/// use pathscore_combine::{SoftmaxWeighter, Weighter};
///
/// let weighter = SoftmaxWeighter::default();
/// let weights = weighter.weights(&[Some(10.0), None, Some(5.0)]).unwrap();
///
/// assert_eq!(weights[1], 0.0);
/// assert!(weights[2] > weights[0]);
/// assert!((weights.sum() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SoftmaxWeighter {
    config: SoftmaxConfig,
}

impl SoftmaxWeighter {
    /// Create a new softmax weighter with the given configuration.
    pub const fn new(config: SoftmaxConfig) -> Self {
        Self { config }
    }

    /// Create a weighter with the given temperature.
    pub const fn with_beta(beta: f64) -> Self {
        Self::new(SoftmaxConfig { beta })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &SoftmaxConfig {
        &self.config
    }
}

impl Weighter for SoftmaxWeighter {
    fn weights(&self, scores: &[Option<f64>]) -> Result<Array1<f64>> {
        let beta = self.config.beta;
        if !beta.is_finite() {
            return Err(PathScoreError::Configuration(format!(
                "softmax beta must be finite, got {beta}"
            )));
        }

        if let Some((idx, score)) = scores
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.filter(|v| !v.is_finite()).map(|v| (i, v)))
        {
            return Err(PathScoreError::InvalidData(format!(
                "score at position {idx} is not finite: {score}"
            )));
        }

        let max_arg = scores
            .iter()
            .flatten()
            .map(|&s| beta * s)
            .fold(f64::NEG_INFINITY, f64::max);

        if max_arg == f64::NEG_INFINITY {
            debug!(entries = scores.len(), "no scored entries, all weights zero");
            return Ok(Array1::zeros(scores.len()));
        }

        let raw: Array1<f64> = scores
            .iter()
            .map(|s| s.map_or(0.0, |v| (beta * v - max_arg).exp()))
            .collect();

        // The maximum term is exp(0) = 1, so the sum is at least 1
        let total = raw.sum();
        Ok(raw / total)
    }

    fn name(&self) -> &str {
        "softmax"
    }
}

/// Normalize sentinel-marked scores with the default softmax weighter.
///
/// Entries equal to [`SENTINEL_SCORE`] are unscored and map to weight 0. The
/// remaining weights sum to 1.
///
/// # Errors
///
/// Returns [`PathScoreError::InvalidData`] if a score is not finite.
pub fn normalize(scores: &[f64]) -> Result<Vec<f64>> {
    let scores: Vec<Option<f64>> = scores
        .iter()
        .map(|&s| (s != SENTINEL_SCORE).then_some(s))
        .collect();
    Ok(SoftmaxWeighter::default().weights(&scores)?.to_vec())
}
