use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::{ActionType, Priority, ScoreTier};

/// Ordered score tier boundaries: [0, warm_min) → cold,
/// [warm_min, hot_min) → warm, [hot_min, ∞) → hot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreTierBounds {
    pub warm_min: f64,
    pub hot_min: f64,
}

impl ScoreTierBounds {
    pub fn tier(&self, score: f64) -> ScoreTier {
        if score >= self.hot_min {
            ScoreTier::Hot
        } else if score >= self.warm_min {
            ScoreTier::Warm
        } else {
            ScoreTier::Cold
        }
    }
}

/// Maps a score tier to the action fired when an entity reaches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerThreshold {
    pub tier: ScoreTier,
    pub action: ActionType,
    pub priority: Priority,
}

/// Eligibility gate for queuing a meeting request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingConfig {
    pub min_score: f64,
}

/// Trigger evaluation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub score_tiers: ScoreTierBounds,
    pub thresholds: Vec<TriggerThreshold>,
    /// Lookback window for action deduplication.
    pub dedup_window_hours: u64,
    pub meeting: MeetingConfig,
}

impl TriggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.score_tiers;
        if !(bounds.warm_min > 0.0 && bounds.warm_min < bounds.hot_min) {
            return Err(ConfigError::InvalidTierBounds {
                kind: "score".to_string(),
                reason: format!(
                    "require 0 < warm_min < hot_min, got {} and {}",
                    bounds.warm_min, bounds.hot_min
                ),
            });
        }
        if self.thresholds.is_empty() {
            return Err(ConfigError::EmptyThresholds);
        }
        if self.dedup_window_hours == 0 {
            return Err(ConfigError::InvalidRunSetting {
                key: "trigger.dedup_window_hours".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
