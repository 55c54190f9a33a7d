#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pathscore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Core data types, errors and collaborator traits
//! - [`eval`] - Alignment, sampling, CRPS and aggregation
//! - [`combine`] - Score weighting strategies
//!
//! ## Architecture
//!
//! Data flows strictly one way:
//!
//! 1. **Producers** generate an ensemble of price paths for a request
//! 2. **Evaluators** align each ensemble with the observed path and score it
//! 3. **Sinks** receive detailed score reports for persistence
//! 4. **Weighters** turn the aggregate scores of all forecasters into weights

/// Version information for the pathscore crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// - [`Path`] and [`Ensemble`] - Observed and simulated price paths
/// - [`ScoreReport`] and [`ScoreVector`] - Scoring results
/// - [`EnsembleProducer`] - Source of simulated ensembles
/// - [`ScoreSink`] - Destination for detailed score reports
pub mod traits {
    pub use pathscore_traits::*;
}

// Re-export core traits at top level for convenience
pub use pathscore_combine::Weighter;
pub use pathscore_traits::{EnsembleProducer, ScoreSink};

// Re-export error types
pub use pathscore_traits::{PathScoreError, Result};

// Re-export common types
pub use pathscore_traits::{
    Ensemble, ForecasterScore, Increment, Path, ScoreRecord, ScoreReport, ScoreVector,
    SimulationRequest, TimePoint, Timestamp,
};

// ============================================================================
// Evaluation
// ============================================================================

/// Forecast evaluation.
///
/// ## Key Components
///
/// - **align**: Restricts predicted and observed paths to shared timestamps
/// - **sample**: Derives the price-change series for one horizon
/// - **crps_ensemble**: Scores an ensemble against one observation
/// - **aggregate**: Sums per-step scores over all horizons
/// - **ForecastEvaluator**: Runs the whole pipeline for one or many forecasters
///
/// ## CRPS
///
/// ```text
/// CRPS = (1/n) Σ_i |x_i - y|  -  (1/(2n²)) Σ_i Σ_j |x_i - x_j|
/// ```
///
/// The score has the units of the price change and is zero only when every
/// ensemble member hits the observation exactly.
///
/// # Example
///
/// ```
/// use pathscore::eval::crps_ensemble;
///
/// assert_eq!(crps_ensemble(&[99.0, 101.0], 100.0), 0.5);
/// ```
pub mod eval {
    pub use pathscore_eval::*;
}

// ============================================================================
// Weighting
// ============================================================================

/// Score weighting strategies.
///
/// This module contains implementations of the [`Weighter`] trait.
///
/// ## Available Weighters
///
/// - **SoftmaxWeighter**: `softmax(beta * score)` over scored forecasters
///
/// # Example
///
/// ```
/// use pathscore::combine::normalize;
///
/// let weights = normalize(&[10.0, -1.0, 5.0]).unwrap();
/// assert_eq!(weights[1], 0.0);
/// assert!(weights[2] > weights[0]);
/// ```
pub mod combine {
    pub use pathscore_combine::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use pathscore::prelude::*;
/// ```
///
/// This brings into scope:
/// - Core traits: [`EnsembleProducer`], [`ScoreSink`], [`Weighter`]
/// - Common types: [`Path`], [`Ensemble`], [`ScoreReport`], [`ScoreVector`]
/// - Entry points: [`ForecastEvaluator`](crate::eval::ForecastEvaluator),
///   [`SoftmaxWeighter`](crate::combine::SoftmaxWeighter)
/// - Error types: [`Result`], [`PathScoreError`]
pub mod prelude {
    pub use crate::combine::{SoftmaxConfig, SoftmaxWeighter};
    pub use crate::eval::{EvaluatorConfig, ForecastEvaluator, ScoringInterval, ScoringIntervals};
    pub use crate::{
        Ensemble, EnsembleProducer, ForecasterScore, Path, ScoreReport, ScoreSink, ScoreVector,
        SimulationRequest, TimePoint, Weighter,
    };
    pub use crate::{PathScoreError, Result};
}

// ============================================================================
// Tests
// ============================================================================
