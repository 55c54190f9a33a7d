//! Realized volatility of an observed path.

use ndarray::Array1;
use pathscore_traits::Path;

/// Five-minute periods in a 365-day year.
pub const FIVE_MINUTE_PERIODS_PER_YEAR: f64 = 105_120.0;

/// Annualized realized volatility of a price path.
///
/// Sample standard deviation (N-1 denominator) of log returns, scaled by
/// `sqrt(periods_per_year)`. Returns `None` for fewer than three points or
/// when a price is not strictly positive.
///
/// # Example
///
/// ```
/// use pathscore_eval::{FIVE_MINUTE_PERIODS_PER_YEAR, realized_volatility};
/// use pathscore_traits::{Path, time::parse_timestamp};
///
/// let start = parse_timestamp("2025-03-04T00:00:00Z").unwrap();
/// let flat = Path::from_prices(&[100.0; 10], start, 300).unwrap();
/// assert_eq!(realized_volatility(&flat, FIVE_MINUTE_PERIODS_PER_YEAR), Some(0.0));
/// ```
pub fn realized_volatility(path: &Path, periods_per_year: f64) -> Option<f64> {
    let prices = path.prices();
    if prices.len() < 3 || prices.iter().any(|&p| !p.is_finite() || p <= 0.0) {
        return None;
    }

    let log_returns: Array1<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let vol = log_returns.std(1.0) * periods_per_year.sqrt();
    vol.is_finite().then_some(vol)
}
