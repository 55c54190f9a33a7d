#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pathscore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and collaborator traits for the pathscore engine.
//!
//! This crate defines the data that flows through forecast scoring: price
//! paths and ensembles, score records and reports, forecaster score vectors,
//! the error type, and the two seams through which external code talks to the
//! engine ([`EnsembleProducer`] and [`ScoreSink`]).

/// The version of the pathscore-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod producer;
pub mod score;
pub mod sink;
pub mod time;
pub mod types;

// Re-exports
pub use error::{PathScoreError, Result};
pub use producer::{EnsembleProducer, SimulationRequest};
pub use score::{ForecasterScore, Increment, SENTINEL_SCORE, ScoreRecord, ScoreReport, ScoreVector};
pub use sink::ScoreSink;
pub use time::Timestamp;
pub use types::{Ensemble, Path, TimePoint};
