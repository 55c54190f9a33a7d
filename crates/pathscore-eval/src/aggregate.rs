//! Multi-horizon CRPS aggregation.
//!
//! Each scoring interval is evaluated independently on its own change series
//! and the per-interval totals are summed. Horizons are not normalized by
//! their step count, so a horizon's weight in the grand total is the number
//! of coarse steps it contributes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use pathscore_traits::{Increment, PathScoreError, Result, ScoreRecord, ScoreReport};

use crate::crps::crps_per_step;
use crate::sampler::{Stride, sample, sample_ensemble};

/// A named scoring horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringInterval {
    /// Label used in score records, e.g. `"5min"`
    pub name: String,
    /// Horizon length in seconds
    pub seconds: u64,
}

impl ScoringInterval {
    /// Create a scoring interval.
    pub fn new(name: impl Into<String>, seconds: u64) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// Ordered set of scoring horizons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringIntervals(Vec<ScoringInterval>);

impl ScoringIntervals {
    /// Create an interval set.
    pub const fn new(intervals: Vec<ScoringInterval>) -> Self {
        Self(intervals)
    }

    /// Standard horizons: 5 minutes, 30 minutes, 3 hours, 24 hours.
    pub fn standard() -> Self {
        Self(vec![
            ScoringInterval::new("5min", 300),
            ScoringInterval::new("30min", 1_800),
            ScoringInterval::new("3hour", 10_800),
            ScoringInterval::new("24hour", 86_400),
        ])
    }

    /// Iterate over the intervals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScoringInterval> {
        self.0.iter()
    }

    /// Number of intervals.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every interval is a positive multiple of `time_increment`.
    ///
    /// # Errors
    ///
    /// Returns [`PathScoreError::Configuration`] for an empty set or a
    /// non-dividing increment.
    pub fn validate(&self, time_increment: u64) -> Result<()> {
        if self.is_empty() {
            return Err(PathScoreError::Configuration(
                "no scoring intervals configured".to_string(),
            ));
        }
        for interval in self.iter() {
            Stride::new(interval.seconds, time_increment).map_err(|e| {
                PathScoreError::Configuration(format!("interval '{}': {e}", interval.name))
            })?;
        }
        Ok(())
    }
}

impl Default for ScoringIntervals {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a ScoringIntervals {
    type Item = &'a ScoringInterval;
    type IntoIter = std::slice::Iter<'a, ScoringInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Score an aligned ensemble against an aligned observed path.
///
/// `predicted` holds one price vector per ensemble member and `real` the
/// observed prices, all sampled every `time_increment` seconds on the same
/// time axis. For each interval the number of scored steps is the smaller of
/// the ensemble and observed change-series lengths.
///
/// The report lists one record per step, followed by a `Total` record, for
/// every interval in order. Its `total_score` is the sum of interval totals.
///
/// # Errors
///
/// Returns [`PathScoreError::Configuration`] if the ensemble is empty, its
/// members differ in length, or an interval is not a multiple of
/// `time_increment`.
pub fn aggregate(
    predicted: &[Vec<f64>],
    real: &[f64],
    time_increment: u64,
    intervals: &ScoringIntervals,
) -> Result<ScoreReport> {
    if predicted.is_empty() {
        return Err(PathScoreError::Configuration(
            "ensemble has no members".to_string(),
        ));
    }
    intervals.validate(time_increment)?;

    let mut report = ScoreReport::default();

    for interval in intervals {
        let stride = Stride::new(interval.seconds, time_increment)?;
        let simulated = sample_ensemble(predicted, stride)?;
        let observed = sample(real, stride);

        let steps = simulated.ncols().min(observed.len());
        let scores = crps_per_step(simulated.view(), &observed, steps);

        report
            .detailed_scores
            .extend(scores.iter().enumerate().map(|(t, &crps)| ScoreRecord {
                interval: interval.name.clone(),
                increment: Increment::Step(t + 1),
                crps,
            }));

        let interval_total: f64 = scores.iter().sum();
        report.detailed_scores.push(ScoreRecord {
            interval: interval.name.clone(),
            increment: Increment::Total,
            crps: interval_total,
        });
        report.total_score += interval_total;

        debug!(
            interval = %interval.name,
            stride = stride.get(),
            steps,
            total = interval_total,
            "scored interval"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_intervals() -> ScoringIntervals {
        ScoringIntervals::new(vec![
            ScoringInterval::new("5min", 300),
            ScoringInterval::new("10min", 600),
        ])
    }

    #[test]
    fn test_standard_intervals() {
        let intervals = ScoringIntervals::default();
        let names: Vec<_> = intervals.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["5min", "30min", "3hour", "24hour"]);
        let seconds: Vec<_> = intervals.iter().map(|i| i.seconds).collect();
        assert_eq!(seconds, vec![300, 1_800, 10_800, 86_400]);
    }

    #[test]
    fn test_validate_intervals() {
        let intervals = ScoringIntervals::standard();
        assert!(intervals.validate(300).is_ok());
        assert!(intervals.validate(60).is_ok());
        assert!(intervals.validate(1).is_ok());
        assert!(intervals.validate(7).is_err());
        assert!(intervals.validate(0).is_err());
        assert!(ScoringIntervals::new(vec![]).validate(300).is_err());
    }

    #[test]
    fn test_aggregate_perfect_forecast_scores_zero() {
        let prices = vec![100.0, 101.0, 99.0, 102.0, 103.0];
        let predicted = vec![prices.clone(), prices.clone(), prices.clone()];

        let report = aggregate(&predicted, &prices, 300, &two_intervals()).unwrap();
        assert_eq!(report.total_score, 0.0);
        assert_eq!(report.scored_steps(), 4 + 2);
    }

    #[test]
    fn test_aggregate_records_layout() {
        let predicted = vec![vec![100.0, 99.0, 100.0], vec![100.0, 101.0, 100.0]];
        let real = vec![100.0, 100.0, 100.0];

        let report = aggregate(&predicted, &real, 300, &two_intervals()).unwrap();
        let layout: Vec<_> = report
            .detailed_scores
            .iter()
            .map(|r| (r.interval.as_str(), r.increment))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("5min", Increment::Step(1)),
                ("5min", Increment::Step(2)),
                ("5min", Increment::Total),
                ("10min", Increment::Step(1)),
                ("10min", Increment::Total),
            ]
        );

        // 5min changes: member 0 [-1, 1], member 1 [1, -1], observed [0, 0]
        assert_relative_eq!(report.detailed_scores[0].crps, 0.5);
        assert_relative_eq!(report.detailed_scores[1].crps, 0.5);
        assert_relative_eq!(report.interval_total("5min").unwrap(), 1.0);
        // 10min changes are all zero
        assert_relative_eq!(report.interval_total("10min").unwrap(), 0.0);
        assert_relative_eq!(report.total_score, 1.0);
    }

    #[test]
    fn test_aggregate_total_is_sum_of_interval_totals() {
        let predicted = vec![
            vec![10.0, 12.0, 11.0, 15.0, 14.0, 13.0, 16.0],
            vec![10.0, 9.0, 8.0, 11.0, 10.0, 12.0, 12.0],
        ];
        let real = vec![10.0, 11.0, 11.0, 12.0, 13.0, 12.0, 14.0];

        let report = aggregate(&predicted, &real, 300, &two_intervals()).unwrap();
        let totals: f64 = report
            .detailed_scores
            .iter()
            .filter(|r| r.increment == Increment::Total)
            .map(|r| r.crps)
            .sum();
        assert_relative_eq!(report.total_score, totals);

        let steps: f64 = report
            .detailed_scores
            .iter()
            .filter(|r| r.increment != Increment::Total)
            .map(|r| r.crps)
            .sum();
        assert_relative_eq!(report.total_score, steps, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_steps_limited_by_shorter_series() {
        let predicted = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]];
        let real = vec![1.0, 2.0, 3.0];

        let intervals = ScoringIntervals::new(vec![ScoringInterval::new("5min", 300)]);
        let report = aggregate(&predicted, &real, 300, &intervals).unwrap();
        assert_eq!(report.scored_steps(), 2);
    }

    #[test]
    fn test_aggregate_single_member_is_absolute_error() {
        let predicted = vec![vec![100.0, 103.0]];
        let real = vec![100.0, 101.0];

        let intervals = ScoringIntervals::new(vec![ScoringInterval::new("5min", 300)]);
        let report = aggregate(&predicted, &real, 300, &intervals).unwrap();
        assert_relative_eq!(report.total_score, 2.0);
    }

    #[test]
    fn test_aggregate_empty_alignment_has_no_steps() {
        let predicted = vec![vec![], vec![]];
        let real: Vec<f64> = vec![];

        let report = aggregate(&predicted, &real, 300, &ScoringIntervals::standard()).unwrap();
        assert_eq!(report.scored_steps(), 0);
        assert_eq!(report.total_score, 0.0);
        assert_eq!(report.detailed_scores.len(), 4);
        assert!(report.score().is_none());
    }

    #[test]
    fn test_aggregate_rejects_bad_input() {
        let intervals = ScoringIntervals::standard();
        assert!(matches!(
            aggregate(&[], &[1.0], 300, &intervals),
            Err(PathScoreError::Configuration(_))
        ));
        assert!(matches!(
            aggregate(&[vec![1.0, 2.0], vec![1.0]], &[1.0, 2.0], 300, &intervals),
            Err(PathScoreError::Configuration(_))
        ));
        assert!(matches!(
            aggregate(&[vec![1.0, 2.0]], &[1.0, 2.0], 7, &intervals),
            Err(PathScoreError::Configuration(_))
        ));
    }

    #[test]
    fn test_finer_horizons_contribute_more_terms() {
        // 24 hours at 5-minute resolution
        let real: Vec<f64> = (0..289).map(|i| 100.0 + f64::from(i % 7)).collect();
        let predicted = vec![vec![100.0; 289], vec![101.0; 289]];

        let report = aggregate(&predicted, &real, 300, &ScoringIntervals::standard()).unwrap();
        let count = |name: &str| {
            report
                .detailed_scores
                .iter()
                .filter(|r| r.interval == name && r.increment != Increment::Total)
                .count()
        };
        assert_eq!(count("5min"), 288);
        assert_eq!(count("30min"), 48);
        assert_eq!(count("3hour"), 8);
        assert_eq!(count("24hour"), 1);
    }
}
