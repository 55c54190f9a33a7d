//! Forecast scoring for pathscore.
//!
//! This crate turns an ensemble of predicted price paths and one observed
//! path into a multi-horizon CRPS score:
//! - Time alignment on exact timestamps
//! - Subsampling and differencing at each scoring horizon
//! - Ensemble CRPS per coarse step
//! - Aggregation into a total score and an audit trail
//! - Ensemble validation and realized volatility helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use pathscore_eval::{EvaluatorConfig, ForecastEvaluator};
//!
//! let evaluator = ForecastEvaluator::new(EvaluatorConfig::default());
//! let report = evaluator.evaluate(&ensemble, &real_path)?;
//! println!("{}", report.to_json_string()?);
//! ```

pub mod aggregate;
pub mod align;
pub mod crps;
pub mod evaluator;
pub mod sampler;
pub mod validate;
pub mod volatility;

// Re-export main types
pub use aggregate::{ScoringInterval, ScoringIntervals, aggregate};
pub use align::{AlignedPaths, align};
pub use crps::{crps_ensemble, crps_per_step};
pub use evaluator::{EvaluatorConfig, ForecastEvaluator};
pub use sampler::{ChangeSeries, Stride, sample, sample_ensemble};
pub use validate::{EnsembleExpectation, uniform_length, validate_ensemble, validate_prices};
pub use volatility::{FIVE_MINUTE_PERIODS_PER_YEAR, realized_volatility};
