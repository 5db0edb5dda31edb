use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityRef;

/// Discrete intent bucket derived from the decayed score via ordered
/// boundaries from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Cold,
    Warm,
    Hot,
}

impl ScoreTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreTier::Cold => "cold",
            ScoreTier::Warm => "warm",
            ScoreTier::Hot => "hot",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current aggregate for an entity: a materialized view over the
/// signal history, not an append log. At most one live score per entity;
/// upserted on every recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub entity: EntityRef,
    /// Sum of configured base weights over all signals.
    pub raw_score: f64,
    /// Age-and-source-adjusted score.
    pub decayed_score: f64,
    pub tier: ScoreTier,
    pub signal_count: usize,
    pub last_signal_at: Option<DateTime<Utc>>,
    pub computed_at: DateTime<Utc>,
    /// True when the safety cap clamped this value on persist.
    pub clamped: bool,
}
