//! Core trait definition for score weighters.

use ndarray::Array1;
use pathscore_traits::{Result, ScoreVector};
use serde::{Deserialize, Serialize};

/// Weight assigned to one forecaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecasterWeight {
    /// Forecaster identifier
    pub forecaster: String,

    /// Non-negative weight; weights over a score vector sum to 1
    pub weight: f64,
}

/// Turns aggregate scores of competing forecasters into weights.
///
/// `None` entries are forecasters without a valid score. They always receive
/// weight 0 and never take part in the computation.
///
/// # Examples
///
/// ```rust,no_run
/// use pathscore_combine::Weighter;
/// use ndarray::Array1;
///
/// struct EqualWeighter;
///
/// impl Weighter for EqualWeighter {
///     fn weights(&self, scores: &[Option<f64>]) -> pathscore_traits::Result<Array1<f64>> {
///         let scored = scores.iter().flatten().count().max(1) as f64;
///         Ok(scores
///             .iter()
///             .map(|s| if s.is_some() { 1.0 / scored } else { 0.0 })
///             .collect())
///     }
///
///     fn name(&self) -> &str {
///         "equal"
///     }
/// }
/// ```
pub trait Weighter: Send + Sync {
    /// Compute one weight per score, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if a present score is not finite.
    fn weights(&self, scores: &[Option<f64>]) -> Result<Array1<f64>>;

    /// Name of this weighting strategy.
    fn name(&self) -> &str;

    /// Weight every forecaster in a score vector.
    ///
    /// # Errors
    ///
    /// Same as [`Self::weights`].
    fn weight_forecasters(&self, scores: &ScoreVector) -> Result<Vec<ForecasterWeight>> {
        let weights = self.weights(&scores.scores())?;
        Ok(scores
            .entries()
            .iter()
            .zip(weights.iter())
            .map(|(entry, &weight)| ForecasterWeight {
                forecaster: entry.forecaster.clone(),
                weight,
            })
            .collect())
    }
}
