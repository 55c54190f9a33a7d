//! Score records, reports and score vectors.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Legacy marker for "no valid score" used by external score stores.
pub const SENTINEL_SCORE: f64 = -1.0;

/// Position of a [`ScoreRecord`] within its interval.
///
/// Serializes as a 1-based integer for a single step, or the string
/// `"Total"` for the interval summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Increment {
    /// One coarse step, numbered from 1
    Step(usize),
    /// Summary of all steps in the interval
    Total,
}

impl Serialize for Increment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Step(n) => serializer.serialize_u64(*n as u64),
            Self::Total => serializer.serialize_str("Total"),
        }
    }
}

impl<'de> Deserialize<'de> for Increment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct IncrementVisitor;

        impl Visitor<'_> for IncrementVisitor {
            type Value = Increment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a step number or \"Total\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Increment, E> {
                Ok(Increment::Step(v as usize))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Increment, E> {
                usize::try_from(v)
                    .map(Increment::Step)
                    .map_err(|_| E::custom(format!("negative increment {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Increment, E> {
                if v == "Total" {
                    Ok(Increment::Total)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(IncrementVisitor)
    }
}

/// One line of the scoring audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Scoring interval name, e.g. `"5min"`
    #[serde(rename = "Interval")]
    pub interval: String,

    /// Step number, or the interval total
    #[serde(rename = "Increment")]
    pub increment: Increment,

    /// CRPS for this step (or sum over the interval)
    #[serde(rename = "CRPS")]
    pub crps: f64,
}

/// Result of scoring one ensemble against one observed path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Sum of all per-interval totals
    pub total_score: f64,

    /// Per-step records followed by one `Total` record per interval
    pub detailed_scores: Vec<ScoreRecord>,
}

impl ScoreReport {
    /// Number of per-step records, excluding interval totals.
    ///
    /// Zero means nothing could be scored (for example an empty alignment),
    /// which is different from scoring zero error.
    pub fn scored_steps(&self) -> usize {
        self.detailed_scores
            .iter()
            .filter(|r| r.increment != Increment::Total)
            .count()
    }

    /// Whether at least one step was scored.
    pub fn has_scores(&self) -> bool {
        self.scored_steps() > 0
    }

    /// The total CRPS for a named interval.
    pub fn interval_total(&self, interval: &str) -> Option<f64> {
        self.detailed_scores
            .iter()
            .find(|r| r.interval == interval && r.increment == Increment::Total)
            .map(|r| r.crps)
    }

    /// The grand total, or `None` if nothing was scored.
    pub fn score(&self) -> Option<f64> {
        self.has_scores().then_some(self.total_score)
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Aggregate CRPS of one forecaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecasterScore {
    /// Forecaster identifier
    pub forecaster: String,

    /// Aggregate score, `None` when the forecaster could not be scored
    pub crps: Option<f64>,
}

impl ForecasterScore {
    /// A scored forecaster.
    pub fn scored(forecaster: impl Into<String>, crps: f64) -> Self {
        Self {
            forecaster: forecaster.into(),
            crps: Some(crps),
        }
    }

    /// A forecaster without a valid score.
    pub fn unscored(forecaster: impl Into<String>) -> Self {
        Self {
            forecaster: forecaster.into(),
            crps: None,
        }
    }
}

/// Scores of competing forecasters, in caller order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector {
    entries: Vec<ForecasterScore>,
}

impl ScoreVector {
    /// Create a score vector from its entries.
    pub const fn new(entries: Vec<ForecasterScore>) -> Self {
        Self { entries }
    }

    /// Build from scores that use `-1` to mark "no score".
    pub fn from_sentinel_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: scores
                .into_iter()
                .map(|(name, score)| {
                    if score == SENTINEL_SCORE {
                        ForecasterScore::unscored(name)
                    } else {
                        ForecasterScore::scored(name, score)
                    }
                })
                .collect(),
        }
    }

    /// Scores with unscored entries replaced by `-1`.
    pub fn to_sentinel_scores(&self) -> Vec<f64> {
        self.entries
            .iter()
            .map(|e| e.crps.unwrap_or(SENTINEL_SCORE))
            .collect()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ForecasterScore) {
        self.entries.push(entry);
    }

    /// All entries.
    pub fn entries(&self) -> &[ForecasterScore] {
        &self.entries
    }

    /// The score column.
    pub fn scores(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|e| e.crps).collect()
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ForecasterScore> for ScoreVector {
    fn from_iter<T: IntoIterator<Item = ForecasterScore>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
