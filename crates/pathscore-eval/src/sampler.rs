//! Multi-resolution price-change series.
//!
//! A price series sampled every `time_increment` seconds is subsampled at a
//! coarser stride and differenced, giving the absolute price movement over
//! each coarse step.

use std::num::NonZeroUsize;

use ndarray::Array2;
use pathscore_traits::{PathScoreError, Result};

/// First differences of a subsampled price series.
///
/// Index `i` holds the movement between coarse steps `i` and `i + 1`.
pub type ChangeSeries = Vec<f64>;

/// Number of base increments in one scoring interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride(NonZeroUsize);

impl Stride {
    /// Derive the stride for `interval_seconds` at a base `time_increment`.
    ///
    /// # Errors
    ///
    /// Returns [`PathScoreError::Configuration`] if the increment is zero or
    /// does not evenly divide the interval.
    pub fn new(interval_seconds: u64, time_increment: u64) -> Result<Self> {
        if time_increment == 0 {
            return Err(PathScoreError::Configuration(
                "time_increment must be positive".to_string(),
            ));
        }
        if interval_seconds % time_increment != 0 {
            return Err(PathScoreError::Configuration(format!(
                "time_increment {time_increment}s does not evenly divide interval {interval_seconds}s"
            )));
        }

        let steps = usize::try_from(interval_seconds / time_increment)
            .map_err(|_| PathScoreError::Configuration("interval too large".to_string()))?;
        NonZeroUsize::new(steps)
            .map(Self)
            .ok_or_else(|| PathScoreError::Configuration("interval must be positive".to_string()))
    }

    /// The stride as a step count.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

/// Subsample `prices` every `stride` points and take first differences.
///
/// Points are taken at `0, stride, 2 * stride, ...`; a trailing partial
/// interval is dropped. Series shorter than two samples give an empty result.
///
/// # Example
///
/// ```
/// use pathscore_eval::{Stride, sample};
///
/// let stride = Stride::new(600, 300).unwrap();
/// let changes = sample(&[100.0, 101.0, 103.0, 102.0, 99.0, 98.0], stride);
/// assert_eq!(changes, vec![3.0, -4.0]);
/// ```
pub fn sample(prices: &[f64], stride: Stride) -> ChangeSeries {
    let sampled: Vec<f64> = prices.iter().copied().step_by(stride.get()).collect();
    sampled.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Apply [`sample`] to every ensemble member.
///
/// Returns a matrix of shape `(members, intervals)`.
///
/// # Errors
///
/// Returns [`PathScoreError::Configuration`] if members have different lengths.
pub fn sample_ensemble(paths: &[Vec<f64>], stride: Stride) -> Result<Array2<f64>> {
    let Some(first) = paths.first() else {
        return Ok(Array2::zeros((0, 0)));
    };

    let length = first.len();
    if let Some((idx, path)) = paths.iter().enumerate().find(|(_, p)| p.len() != length) {
        return Err(PathScoreError::Configuration(format!(
            "ensemble member {idx} has {} points, expected {length}",
            path.len()
        )));
    }

    let n_intervals = length.saturating_sub(1) / stride.get();
    let mut flat = Vec::with_capacity(paths.len() * n_intervals);
    for path in paths {
        flat.extend(sample(path, stride));
    }

    Array2::from_shape_vec((paths.len(), n_intervals), flat)
        .map_err(|e| PathScoreError::Other(format!("change matrix shape: {e}")))
}
