//! Ensemble producer trait.
//!
//! Price-simulation strategies (GBM, GARCH, historical resampling, external
//! forecasting models, ...) live outside this workspace. They plug into the
//! scoring engine by implementing [`EnsembleProducer`].

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, serde_timestamp};
use crate::{Ensemble, Result};

/// Parameters for one ensemble simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Last observed price before `start_time`
    pub current_price: f64,

    /// Spacing between predicted points, in seconds
    pub time_increment: u64,

    /// Horizon covered by each path, in seconds
    pub time_length: u64,

    /// Number of paths to generate
    pub num_simulations: usize,

    /// Time of the first predicted point
    #[serde(with = "serde_timestamp")]
    pub start_time: Timestamp,
}

impl SimulationRequest {
    /// Number of points each path is expected to contain.
    pub const fn points_per_path(&self) -> usize {
        if self.time_increment == 0 {
            return 0;
        }
        (self.time_length / self.time_increment) as usize + 1
    }
}

/// A source of ensemble forecasts.
///
/// # Example
///
/// ```no_run
/// use pathscore_traits::{Ensemble, EnsembleProducer, Result, SimulationRequest};
///
/// struct FlatForecast;
///
/// impl EnsembleProducer for FlatForecast {
///     fn name(&self) -> &str {
///         "flat"
///     }
///
///     fn produce(&self, request: &SimulationRequest) -> Result<Ensemble> {
///         let row = vec![request.current_price; request.points_per_path()];
///         let rows = vec![row; request.num_simulations];
///         Ensemble::from_price_matrix(&rows, request.start_time, request.time_increment)
///     }
/// }
/// ```
pub trait EnsembleProducer: Send + Sync {
    /// Identifier of this forecaster.
    fn name(&self) -> &str;

    /// Generate an ensemble of predicted paths.
    ///
    /// # Errors
    ///
    /// Implementations should return [`crate::PathScoreError::Producer`] when
    /// the simulation cannot be run.
    fn produce(&self, request: &SimulationRequest) -> Result<Ensemble>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    fn request() -> SimulationRequest {
        SimulationRequest {
            current_price: 100.0,
            time_increment: 300,
            time_length: 86_400,
            num_simulations: 4,
            start_time: parse_timestamp("2025-03-04T00:00:00Z").unwrap(),
        }
    }

    #[test]
    fn test_points_per_path() {
        assert_eq!(request().points_per_path(), 289);

        let degenerate = SimulationRequest {
            time_increment: 0,
            ..request()
        };
        assert_eq!(degenerate.points_per_path(), 0);
    }

    #[test]
    fn test_request_json() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["start_time"], "2025-03-04T00:00:00+00:00");
        let back: SimulationRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back, request());
    }
}
