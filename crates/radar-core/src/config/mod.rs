pub mod defaults;
pub mod detection_config;
pub mod run_config;
pub mod scoring_config;
pub mod trigger_config;

pub use detection_config::{
    ChangePattern, ConfidenceTierBounds, ContradictionRule, DetectionConfig, FieldCondition,
    MovementRule,
};
pub use run_config::RunConfig;
pub use scoring_config::{DecayBand, SafetyCapConfig, ScoringConfig};
pub use trigger_config::{MeetingConfig, ScoreTierBounds, TriggerConfig, TriggerThreshold};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The full engine configuration document. Operators supply this as TOML;
/// loading validates every section and fails fast on partial configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarConfig {
    pub detection: DetectionConfig,
    pub scoring: ScoringConfig,
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl RadarConfig {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RadarConfig = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detection.validate()?;
        self.scoring.validate()?;
        self.trigger.validate()?;
        self.run.validate()?;
        Ok(())
    }
}
