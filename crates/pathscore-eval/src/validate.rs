//! Ensemble shape and timing validation.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use pathscore_traits::time::{Timestamp, format_timestamp, serde_timestamp};
use pathscore_traits::{Ensemble, Path, PathScoreError, Result, SimulationRequest, TimePoint};

/// What a submitted ensemble is expected to look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsembleExpectation {
    /// Number of member paths
    pub num_simulations: usize,
    /// Horizon covered by each path, in seconds
    pub time_length: u64,
    /// Spacing between points, in seconds
    pub time_increment: u64,
    /// Time of every path's first point
    #[serde(with = "serde_timestamp")]
    pub start_time: Timestamp,
}

impl EnsembleExpectation {
    /// Points each path must contain: `time_length / time_increment + 1`.
    pub const fn points_per_path(&self) -> usize {
        if self.time_increment == 0 {
            return 0;
        }
        (self.time_length / self.time_increment) as usize + 1
    }
}

impl From<&SimulationRequest> for EnsembleExpectation {
    fn from(request: &SimulationRequest) -> Self {
        Self {
            num_simulations: request.num_simulations,
            time_length: request.time_length,
            time_increment: request.time_increment,
            start_time: request.start_time,
        }
    }
}

/// Validate an ensemble against its expected shape and timing.
///
/// Checks, in order: the ensemble is non-empty, has `num_simulations`
/// members, and each member has the expected number of points, starts at
/// `start_time`, advances by exactly `time_increment`, and carries finite,
/// strictly positive prices. The first violation is reported.
///
/// # Errors
///
/// Returns [`PathScoreError::InvalidEnsemble`] describing the violation, or
/// [`PathScoreError::Configuration`] if `time_increment` is zero or too large
/// to represent as a duration.
pub fn validate_ensemble(ensemble: &Ensemble, expected: &EnsembleExpectation) -> Result<()> {
    if expected.time_increment == 0 {
        return Err(PathScoreError::Configuration(
            "time_increment must be positive".to_string(),
        ));
    }
    if ensemble.is_empty() {
        return Err(PathScoreError::InvalidEnsemble(
            "ensemble is empty".to_string(),
        ));
    }
    if ensemble.len() != expected.num_simulations {
        return Err(PathScoreError::InvalidEnsemble(format!(
            "number of paths is incorrect: expected {}, got {}",
            expected.num_simulations,
            ensemble.len()
        )));
    }

    let expected_points = expected.points_per_path();
    let step = i64::try_from(expected.time_increment)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| {
            PathScoreError::Configuration(format!(
                "time_increment {}s is out of range",
                expected.time_increment
            ))
        })?;

    for (idx, path) in ensemble.paths().iter().enumerate() {
        if path.len() != expected_points {
            return Err(PathScoreError::InvalidEnsemble(format!(
                "path {idx}: number of time points is incorrect: expected {expected_points}, got {}",
                path.len()
            )));
        }

        let points = path.points();
        if let Some(first) = points.first()
            && first.time != expected.start_time
        {
            return Err(PathScoreError::InvalidEnsemble(format!(
                "path {idx}: start time is incorrect: expected {}, got {}",
                format_timestamp(&expected.start_time),
                format_timestamp(&first.time)
            )));
        }

        for w in points.windows(2) {
            let delta = w[1].time - w[0].time;
            if delta != step {
                return Err(PathScoreError::InvalidEnsemble(format!(
                    "path {idx}: time increment is incorrect at {}: expected {}s, got {}s",
                    format_timestamp(&w[1].time),
                    expected.time_increment,
                    delta.num_seconds()
                )));
            }
        }

        if let Some(bad) = first_invalid_price(path) {
            return Err(PathScoreError::InvalidEnsemble(format!(
                "path {idx}: {}",
                invalid_price_message(bad)
            )));
        }
    }

    Ok(())
}

/// Check that every price in `path` is finite and strictly positive.
///
/// # Errors
///
/// Returns [`PathScoreError::InvalidData`] naming the first offending point.
pub fn validate_prices(path: &Path) -> Result<()> {
    match first_invalid_price(path) {
        Some(bad) => Err(PathScoreError::InvalidData(invalid_price_message(bad))),
        None => Ok(()),
    }
}

pub(crate) fn first_invalid_price(path: &Path) -> Option<&TimePoint> {
    path.points()
        .iter()
        .find(|p| !p.price.is_finite() || p.price <= 0.0)
}

pub(crate) fn invalid_price_message(point: &TimePoint) -> String {
    format!(
        "price at {} must be finite and positive, got {}",
        format_timestamp(&point.time),
        point.price
    )
}

/// Check that all members have the same length and return it.
///
/// # Errors
///
/// Returns [`PathScoreError::Configuration`] if the ensemble is empty or
/// ragged.
pub fn uniform_length(ensemble: &Ensemble) -> Result<usize> {
    let Some(first) = ensemble.paths().first() else {
        return Err(PathScoreError::Configuration(
            "ensemble has no members".to_string(),
        ));
    };

    let length = first.len();
    match ensemble
        .paths()
        .iter()
        .enumerate()
        .find(|(_, p)| p.len() != length)
    {
        Some((idx, path)) => Err(PathScoreError::Configuration(format!(
            "ensemble member {idx} has {} points, expected {length}",
            path.len()
        ))),
        None => Ok(length),
    }
}
