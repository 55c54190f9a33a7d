//! Continuous Ranked Probability Score for ensemble forecasts.
//!
//! The ensemble is treated as an empirical distribution and scored with the
//! energy form
//!
//! ```text
//! CRPS = (1/n) Σ_i |x_i - y|  -  (1/(2n²)) Σ_i Σ_j |x_i - x_j|
//! ```
//!
//! No distributional assumption is made about the members. Lower is better,
//! and the score is zero only when every member equals the observation.

use ndarray::ArrayView2;

/// CRPS of an ensemble forecast against one observation.
///
/// The pairwise term is evaluated from the sorted sample in `O(n log n)`:
/// with gaps `g_k = x_(k) - x_(k-1)`, `Σ_i Σ_j |x_i - x_j| = 2 Σ_k g_k k (n - k)`.
/// A single-member ensemble reduces to the absolute error. An empty ensemble
/// returns `NaN`, as does any non-finite member or observation.
///
/// # Example
///
/// ```
/// use pathscore_eval::crps_ensemble;
///
/// assert_eq!(crps_ensemble(&[100.0, 100.0, 100.0], 100.0), 0.0);
/// assert_eq!(crps_ensemble(&[99.0, 101.0], 100.0), 0.5);
/// assert_eq!(crps_ensemble(&[97.0], 100.0), 3.0);
/// ```
pub fn crps_ensemble(forecasts: &[f64], observation: f64) -> f64 {
    let n = forecasts.len();
    if n == 0 {
        return f64::NAN;
    }

    let nf = n as f64;
    let abs_error = forecasts
        .iter()
        .map(|x| (x - observation).abs())
        .sum::<f64>()
        / nf;

    if n == 1 {
        return abs_error;
    }

    let mut sorted = forecasts.to_vec();
    sorted.sort_by(f64::total_cmp);

    // Half of the double sum over all ordered pairs
    let half_pair_sum: f64 = sorted
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let k = (i + 1) as f64;
            (w[1] - w[0]) * k * (nf - k)
        })
        .sum();

    // Clamp rounding negatives only; NaN must stay NaN
    let crps = abs_error - half_pair_sum / (nf * nf);
    if crps < 0.0 { 0.0 } else { crps }
}

/// Per-step CRPS over the first `steps` columns of a change matrix.
///
/// Column `t` of `forecasts` (one row per ensemble member) is scored against
/// `observations[t]`. `steps` is capped at the number of columns and
/// observations available.
pub fn crps_per_step(
    forecasts: ArrayView2<'_, f64>,
    observations: &[f64],
    steps: usize,
) -> Vec<f64> {
    let steps = steps.min(forecasts.ncols()).min(observations.len());
    (0..steps)
        .map(|t| crps_ensemble(&forecasts.column(t).to_vec(), observations[t]))
        .collect()
}
