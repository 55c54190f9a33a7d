//! Time alignment of predicted and observed paths.
//!
//! Paths are matched on exact timestamp equality. The observed path acts as a
//! shrinking working set: each predicted path in turn removes the observed
//! times it does not contain. Every predicted path is then projected onto the
//! surviving times, so all outputs share one time axis.

use pathscore_traits::Path;
use tracing::{debug, warn};

/// Predicted and observed paths projected onto their common timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPaths {
    /// Predicted paths, in input order
    pub predicted: Vec<Path>,
    /// Observed path
    pub real: Path,
}

impl AlignedPaths {
    /// Length of the common time axis.
    pub const fn len(&self) -> usize {
        self.real.len()
    }

    /// Whether the paths have no timestamp in common.
    pub const fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Price columns of the predicted paths.
    pub fn predicted_prices(&self) -> Vec<Vec<f64>> {
        self.predicted.iter().map(Path::prices).collect()
    }

    /// Price column of the observed path.
    pub fn real_prices(&self) -> Vec<f64> {
        self.real.prices()
    }
}

/// Align predicted paths with an observed path.
///
/// All returned paths have the same length and the same timestamps, in their
/// original order. An empty intersection is a valid result and yields empty
/// paths everywhere.
///
/// # Example
///
/// ```
/// use pathscore_eval::align;
/// use pathscore_traits::{Path, time::parse_timestamp};
///
/// let start = parse_timestamp("2025-03-04T00:00:00Z").unwrap();
/// let predicted = vec![Path::from_prices(&[1.0, 2.0, 3.0], start, 300).unwrap()];
/// let real = Path::from_prices(&[1.5, 2.5, 3.5, 4.5, 5.5, 6.5], start, 150).unwrap();
///
/// let aligned = align(&predicted, &real);
/// assert_eq!(aligned.len(), 3);
/// assert_eq!(aligned.real_prices(), vec![1.5, 3.5, 5.5]);
/// ```
pub fn align(predicted: &[Path], real: &Path) -> AlignedPaths {
    let mut common = real.clone();
    for path in predicted {
        if common.is_empty() {
            break;
        }
        common = common.retain_times(&path.time_set());
    }

    let times = common.time_set();
    let predicted: Vec<Path> = predicted.iter().map(|p| p.retain_times(&times)).collect();

    if common.is_empty() {
        warn!(
            members = predicted.len(),
            real_points = real.len(),
            "predicted and observed paths share no timestamps"
        );
    } else {
        debug!(
            members = predicted.len(),
            real_points = real.len(),
            aligned_points = common.len(),
            "aligned paths"
        );
    }

    AlignedPaths {
        predicted,
        real: common,
    }
}
