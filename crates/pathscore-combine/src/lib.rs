//! Score-to-weight conversion for competing forecasters.
//!
//! Aggregate CRPS scores are error measures, so weighting favors lower
//! scores. Forecasters without a valid score are excluded from the
//! computation and receive weight 0.
//!
//! # Examples
//!
//! ```
//! use pathscore_combine::{SoftmaxWeighter, Weighter};
//! use pathscore_traits::{ForecasterScore, ScoreVector};
//!
//! let scores: ScoreVector = vec![
//!     ForecasterScore::scored("gbm", 120.0),
//!     ForecasterScore::unscored("garch"),
//!     ForecasterScore::scored("resample", 95.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let weights = SoftmaxWeighter::default().weight_forecasters(&scores).unwrap();
//! assert_eq!(weights[1].weight, 0.0);
//! assert!(weights[2].weight > weights[0].weight);
//! ```

mod softmax;
mod weighter;

// Re-export main types
pub use softmax::{SoftmaxConfig, SoftmaxWeighter, normalize};
pub use weighter::{ForecasterWeight, Weighter};
