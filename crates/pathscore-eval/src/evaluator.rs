//! End-to-end forecast evaluation.
//!
//! Ties alignment, multi-horizon sampling and CRPS aggregation together, and
//! scores batches of competing forecasters against one observed path.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pathscore_traits::{
    Ensemble, EnsembleProducer, ForecasterScore, Path, PathScoreError, Result, ScoreReport,
    ScoreSink, ScoreVector, SimulationRequest,
};

use crate::aggregate::{ScoringIntervals, aggregate};
use crate::align::align;
use crate::validate::{
    first_invalid_price, invalid_price_message, uniform_length, validate_prices,
};

/// Configuration for forecast evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Spacing of predicted points, in seconds
    pub time_increment: u64,
    /// Horizons to score
    pub intervals: ScoringIntervals,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            time_increment: 300,
            intervals: ScoringIntervals::standard(),
        }
    }
}

impl EvaluatorConfig {
    /// Check that every interval is a multiple of the time increment.
    ///
    /// # Errors
    ///
    /// Returns [`PathScoreError::Configuration`] on violation.
    pub fn validate(&self) -> Result<()> {
        self.intervals.validate(self.time_increment)
    }
}

/// Scores ensemble forecasts against observed price paths.
///
/// The evaluator holds no mutable state, so one instance can score any number
/// of forecasters, including from several threads.
///
/// # Example
///
/// ```
/// use pathscore_eval::{EvaluatorConfig, ForecastEvaluator};
/// use pathscore_traits::{Ensemble, Path, time::parse_timestamp};
///
/// let start = parse_timestamp("2025-03-04T00:00:00Z").unwrap();
/// let real = Path::from_prices(&[100.0, 101.0, 102.0], start, 300).unwrap();
/// let ensemble = Ensemble::from_price_matrix(
///     &[vec![100.0, 100.5, 101.0], vec![100.0, 101.5, 103.0]],
///     start,
///     300,
/// )
/// .unwrap();
///
/// let evaluator = ForecastEvaluator::new(EvaluatorConfig::default());
/// let report = evaluator.evaluate(&ensemble, &real).unwrap();
/// assert_eq!(report.scored_steps(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForecastEvaluator {
    config: EvaluatorConfig,
}

impl ForecastEvaluator {
    /// Create a new evaluator.
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// The evaluator configuration.
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Align `ensemble` with `real` and score it over every interval.
    ///
    /// A forecast that shares no timestamps with the observed path yields a
    /// report with zero scored steps rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`PathScoreError::Configuration`] for an invalid configuration,
    /// an empty ensemble, or members of different lengths, and
    /// [`PathScoreError::InvalidData`] if any predicted or observed price is
    /// not finite and strictly positive.
    pub fn evaluate(&self, ensemble: &Ensemble, real: &Path) -> Result<ScoreReport> {
        self.config.validate()?;
        uniform_length(ensemble)?;
        validate_prices(real)?;
        for (idx, path) in ensemble.paths().iter().enumerate() {
            if let Some(bad) = first_invalid_price(path) {
                return Err(PathScoreError::InvalidData(format!(
                    "ensemble member {idx}: {}",
                    invalid_price_message(bad)
                )));
            }
        }

        let aligned = align(ensemble.paths(), real);
        aggregate(
            &aligned.predicted_prices(),
            &aligned.real_prices(),
            self.config.time_increment,
            &self.config.intervals,
        )
    }

    /// Aggregate score of `ensemble`, or `None` if nothing could be scored.
    ///
    /// # Errors
    ///
    /// Same as [`Self::evaluate`].
    pub fn score(&self, ensemble: &Ensemble, real: &Path) -> Result<Option<f64>> {
        Ok(self.evaluate(ensemble, real)?.score())
    }

    /// Ask `producer` for an ensemble and score it.
    ///
    /// # Errors
    ///
    /// Propagates producer failures and the errors of [`Self::evaluate`].
    pub fn evaluate_producer(
        &self,
        producer: &dyn EnsembleProducer,
        request: &SimulationRequest,
        real: &Path,
    ) -> Result<ScoreReport> {
        if request.time_increment != self.config.time_increment {
            return Err(PathScoreError::Configuration(format!(
                "request time_increment {}s differs from evaluator time_increment {}s",
                request.time_increment, self.config.time_increment
            )));
        }

        let ensemble = producer.produce(request)?;
        debug!(
            producer = producer.name(),
            members = ensemble.len(),
            "produced ensemble"
        );
        self.evaluate(&ensemble, real)
    }

    /// Score many forecasters against the same observed path.
    ///
    /// Forecasters are evaluated in parallel; the result keeps input order.
    /// A forecaster whose ensemble is malformed or does not overlap the
    /// observed path is reported as unscored instead of failing the batch.
    ///
    /// # Errors
    ///
    /// Returns [`PathScoreError::Configuration`] if the evaluator
    /// configuration itself is invalid, and [`PathScoreError::InvalidData`]
    /// if the observed path has a non-finite or non-positive price.
    pub fn score_all<S>(&self, forecasts: &[(S, Ensemble)], real: &Path) -> Result<ScoreVector>
    where
        S: AsRef<str> + Sync,
    {
        self.config.validate()?;
        validate_prices(real)?;
        Ok(self
            .evaluate_batch(forecasts, real)
            .into_iter()
            .map(|(name, outcome)| to_forecaster_score(name, outcome.as_ref()))
            .collect())
    }

    /// Like [`Self::score_all`], also handing every successful report to `sink`
    /// in input order.
    ///
    /// # Errors
    ///
    /// Returns configuration errors, an invalid observed path, and the first
    /// error raised by `sink`.
    pub fn score_all_into<S>(
        &self,
        forecasts: &[(S, Ensemble)],
        real: &Path,
        sink: &mut dyn ScoreSink,
    ) -> Result<ScoreVector>
    where
        S: AsRef<str> + Sync,
    {
        self.config.validate()?;
        validate_prices(real)?;
        let outcomes = self.evaluate_batch(forecasts, real);

        let mut scores = ScoreVector::default();
        for (name, outcome) in outcomes {
            if let Ok(report) = &outcome {
                sink.record(name, report)?;
            }
            scores.push(to_forecaster_score(name, outcome.as_ref()));
        }
        Ok(scores)
    }

    fn evaluate_batch<'a, S>(
        &self,
        forecasts: &'a [(S, Ensemble)],
        real: &Path,
    ) -> Vec<(&'a str, Result<ScoreReport>)>
    where
        S: AsRef<str> + Sync,
    {
        forecasts
            .par_iter()
            .map(|(name, ensemble)| (name.as_ref(), self.evaluate(ensemble, real)))
            .collect()
    }
}

fn to_forecaster_score(
    name: &str,
    outcome: std::result::Result<&ScoreReport, &PathScoreError>,
) -> ForecasterScore {
    match outcome {
        Ok(report) => match report.score() {
            Some(score) => ForecasterScore::scored(name, score),
            None => {
                warn!(forecaster = name, "no overlapping steps, forecaster left unscored");
                ForecasterScore::unscored(name)
            }
        },
        Err(e) => {
            warn!(forecaster = name, error = %e, "evaluation failed, forecaster left unscored");
            ForecasterScore::unscored(name)
        }
    }
}
