//! Timestamp parsing and formatting.
//!
//! Every timestamp entering the engine is normalized to UTC and truncated to
//! whole seconds, so that alignment can compare times by exact equality.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};

use crate::{PathScoreError, Result};

/// A UTC timestamp with second precision.
pub type Timestamp = DateTime<Utc>;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 strings with any offset (`Z`, `+00:00`, `+02:00`, ...)
/// and naive date-times, which are taken to be UTC. Sub-second digits are
/// discarded.
///
/// # Example
///
/// ```
/// use pathscore_traits::time::{format_timestamp, parse_timestamp};
///
/// let ts = parse_timestamp("2025-02-26T07:38:00.000Z").unwrap();
/// assert_eq!(format_timestamp(&ts), "2025-02-26T07:38:00+00:00");
/// ```
pub fn parse_timestamp(s: &str) -> Result<Timestamp> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(normalize(dt.with_timezone(&Utc)));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| normalize(naive.and_utc()))
        .ok_or_else(|| PathScoreError::InvalidTime(format!("not an ISO-8601 timestamp: {s:?}")))
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS+00:00`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Truncate a timestamp to whole seconds.
pub fn normalize(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(0)
}

/// Serde adapter for [`Timestamp`] fields using [`parse_timestamp`] and
/// [`format_timestamp`].
pub mod serde_timestamp {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    use super::{Timestamp, format_timestamp, parse_timestamp};

    /// Serialize a timestamp as an ISO-8601 string.
    pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }

    /// Deserialize a timestamp from an ISO-8601 string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(D::Error::custom)
    }
}
