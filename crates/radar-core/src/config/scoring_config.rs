use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::models::SignalType;

/// One step of the age-based decay curve: signals up to `max_age_days`
/// old contribute at `factor`. Bands are ordered by age; anything older
/// than the last band contributes at the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecayBand {
    pub max_age_days: u64,
    pub factor: f64,
}

/// Hard limit on how much a score may increase within a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyCapConfig {
    pub max_delta: f64,
    #[serde(default = "defaults::safety_cap_window_hours")]
    pub window_hours: u64,
}

/// Scoring subsystem configuration. Weight table and decay curve are
/// required: the engine refuses to start without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base weight per signal type. Must cover every signal type.
    pub weights: HashMap<SignalType, f64>,
    /// Ordered decay steps.
    pub decay_bands: Vec<DecayBand>,
    /// Contribution floor for very old signals. Strictly positive so
    /// long-tail memory is never fully erased.
    pub decay_floor: f64,
    /// Per-source confidence modifiers; unknown sources use the default.
    #[serde(default)]
    pub source_modifiers: HashMap<String, f64>,
    #[serde(default = "defaults::source_modifier")]
    pub default_source_modifier: f64,
    pub safety_cap: SafetyCapConfig,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for signal_type in SignalType::ALL {
            if !self.weights.contains_key(&signal_type) {
                return Err(ConfigError::MissingWeight {
                    signal_type: signal_type.to_string(),
                });
            }
        }

        if self.decay_bands.is_empty() {
            return Err(ConfigError::EmptyDecayCurve);
        }
        for (i, window) in self.decay_bands.windows(2).enumerate() {
            let ordered = window[0].max_age_days < window[1].max_age_days;
            let non_increasing = window[0].factor >= window[1].factor;
            if !ordered || !non_increasing {
                return Err(ConfigError::NonMonotonicDecay { index: i + 1 });
            }
        }
        if self.decay_floor <= 0.0 {
            return Err(ConfigError::InvalidDecayFloor {
                floor: self.decay_floor,
            });
        }
        if let Some(last) = self.decay_bands.last() {
            if self.decay_floor > last.factor {
                return Err(ConfigError::NonMonotonicDecay {
                    index: self.decay_bands.len(),
                });
            }
        }

        if self.safety_cap.max_delta <= 0.0 {
            return Err(ConfigError::InvalidSafetyCap {
                max_delta: self.safety_cap.max_delta,
            });
        }

        Ok(())
    }
}
