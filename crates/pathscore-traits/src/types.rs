//! Price path types.
//!
//! A [`Path`] is one realization of an asset's price over a horizon, either
//! predicted or observed. An [`Ensemble`] is a set of predicted paths for the
//! same start time and horizon.

use std::collections::HashSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{PathScoreError, Result};
use crate::time::{Timestamp, normalize, serde_timestamp};

/// A single timestamped price.
///
/// Serializes as `{"time": "<ISO-8601>", "price": <number>}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Observation time (UTC, second precision)
    #[serde(with = "serde_timestamp")]
    pub time: Timestamp,

    /// Asset price
    pub price: f64,
}

impl TimePoint {
    /// Create a new time point, truncating `time` to whole seconds.
    pub fn new(time: Timestamp, price: f64) -> Self {
        Self {
            time: normalize(time),
            price,
        }
    }
}

/// An ordered sequence of timestamped prices.
///
/// Predicted paths are uniformly spaced by their `time_increment`; observed
/// paths may have gaps until they are aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<TimePoint>,
}

impl Path {
    /// Create a path from its points.
    pub const fn new(points: Vec<TimePoint>) -> Self {
        Self { points }
    }

    /// Build a uniformly spaced path from raw prices.
    ///
    /// Point `i` is stamped `start + i * time_increment` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`PathScoreError::Configuration`] if a timestamp would fall
    /// outside the representable range.
    ///
    /// # Example
    ///
    /// ```
    /// use pathscore_traits::{Path, time::parse_timestamp};
    ///
    /// let start = parse_timestamp("2025-03-04T00:00:00Z").unwrap();
    /// let path = Path::from_prices(&[100.0, 101.0, 99.5], start, 300).unwrap();
    /// assert_eq!(path.len(), 3);
    /// ```
    pub fn from_prices(prices: &[f64], start: Timestamp, time_increment: u64) -> Result<Self> {
        let start = normalize(start);
        let step = i64::try_from(time_increment)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                PathScoreError::Configuration(format!(
                    "time_increment {time_increment}s is out of range"
                ))
            })?;

        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                i32::try_from(i)
                    .ok()
                    .and_then(|i| step.checked_mul(i))
                    .and_then(|offset| start.checked_add_signed(offset))
                    .map(|time| TimePoint { time, price })
                    .ok_or_else(|| {
                        PathScoreError::Configuration(format!(
                            "point {i} at {time_increment}s spacing is out of the time range"
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }

    /// Parse a path from a JSON array of `{time, price}` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The points of this path, in time order.
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Number of points.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time of the first point, if any.
    pub fn start_time(&self) -> Option<Timestamp> {
        self.points.first().map(|p| p.time)
    }

    /// The price column.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// The set of timestamps present in this path.
    pub fn time_set(&self) -> HashSet<Timestamp> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Keep only the points whose time is in `times`, preserving order.
    pub fn retain_times(&self, times: &HashSet<Timestamp>) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|p| times.contains(&p.time))
                .copied()
                .collect(),
        }
    }
}

impl From<Vec<TimePoint>> for Path {
    fn from(points: Vec<TimePoint>) -> Self {
        Self::new(points)
    }
}

/// A set of predicted paths for the same start time and horizon.
///
/// Created by a simulation collaborator and consumed read-only by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ensemble {
    paths: Vec<Path>,
}

impl Ensemble {
    /// Create an ensemble from its member paths.
    pub const fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Build an ensemble from a matrix of raw prices, one row per member.
    ///
    /// # Errors
    ///
    /// Same as [`Path::from_prices`].
    pub fn from_price_matrix(
        rows: &[Vec<f64>],
        start: Timestamp,
        time_increment: u64,
    ) -> Result<Self> {
        Ok(Self {
            paths: rows
                .iter()
                .map(|row| Path::from_prices(row, start, time_increment))
                .collect::<Result<_>>()?,
        })
    }

    /// Parse an ensemble from a JSON array of paths.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Member paths.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of members.
    pub const fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the ensemble has no members.
    pub const fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl From<Vec<Path>> for Ensemble {
    fn from(paths: Vec<Path>) -> Self {
        Self::new(paths)
    }
}
