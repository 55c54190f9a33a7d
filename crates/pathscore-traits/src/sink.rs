//! Score consumer trait.

use crate::{Result, ScoreReport};

/// Receives finished score reports for persistence or display.
///
/// The engine never writes anything itself; callers pass a sink to collect
/// reports in the order forecasters were supplied.
pub trait ScoreSink {
    /// Accept the report computed for `forecaster`.
    ///
    /// # Errors
    ///
    /// Implementations should return [`crate::PathScoreError::Sink`] when the
    /// report cannot be stored.
    fn record(&mut self, forecaster: &str, report: &ScoreReport) -> Result<()>;
}

impl ScoreSink for Vec<(String, ScoreReport)> {
    fn record(&mut self, forecaster: &str, report: &ScoreReport) -> Result<()> {
        self.push((forecaster.to_string(), report.clone()));
        Ok(())
    }
}
