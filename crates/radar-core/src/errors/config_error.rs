/// Configuration errors. All of these are fatal at startup: the engine
/// refuses to process with partial configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {message}")]
    Parse { message: String },

    #[error("missing weight for signal type '{signal_type}'")]
    MissingWeight { signal_type: String },

    #[error("decay curve is empty")]
    EmptyDecayCurve,

    #[error("decay curve not monotonically non-increasing at band {index}")]
    NonMonotonicDecay { index: usize },

    #[error("decay floor must be positive, got {floor}")]
    InvalidDecayFloor { floor: f64 },

    #[error("invalid tier boundaries for {kind}: {reason}")]
    InvalidTierBounds { kind: String, reason: String },

    #[error("movement rule set is empty")]
    EmptyRuleSet,

    #[error("rule '{rule_id}': invalid pattern '{pattern}': {message}")]
    InvalidRulePattern {
        rule_id: String,
        pattern: String,
        message: String,
    },

    #[error("trigger threshold table is empty")]
    EmptyThresholds,

    #[error("safety cap max_delta must be positive, got {max_delta}")]
    InvalidSafetyCap { max_delta: f64 },

    #[error("invalid run setting {key}: {reason}")]
    InvalidRunSetting { key: String, reason: String },
}
