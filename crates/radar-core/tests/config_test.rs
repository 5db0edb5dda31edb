use radar_core::config::RadarConfig;
use radar_core::errors::ConfigError;
use radar_core::models::{ConfidenceTier, ScoreTier, SignalType};
use radar_core::traits::IScoringTables;

const SAMPLE: &str = r#"
[detection]
hash_fields = ["employer", "title", "seniority", "department", "employment_status"]

[detection.confidence_tiers]
medium_min = 0.5
high_min = 0.8

[[detection.movement_rules]]
id = "hire-employer-gained"
movement = "hire"
base_confidence = 0.9
[[detection.movement_rules.conditions]]
field = "employer"
change = "gained"

[[detection.movement_rules]]
id = "exit-employer-cleared"
movement = "exit"
base_confidence = 0.85
[[detection.movement_rules.conditions]]
field = "employer"
change = "cleared"

[[detection.contradiction_rules]]
id = "former-title-active-status"
field_a = "title"
pattern_a = "(?i)former|ex-"
field_b = "employment_status"
pattern_b = "(?i)^active$"

[scoring]
decay_floor = 0.1

[scoring.weights]
movement_hire = 30.0
movement_exit = 25.0
movement_promotion = 20.0
movement_transfer = 15.0
profile_view = 5.0
email_open = 3.0
email_click = 8.0
website_visit = 6.0
content_download = 10.0

[[scoring.decay_bands]]
max_age_days = 7
factor = 1.0

[[scoring.decay_bands]]
max_age_days = 30
factor = 0.7

[[scoring.decay_bands]]
max_age_days = 90
factor = 0.4

[scoring.source_modifiers]
linkedin = 1.2
web = 0.8

[scoring.safety_cap]
max_delta = 25.0
window_hours = 24

[trigger]
dedup_window_hours = 72

[trigger.score_tiers]
warm_min = 40.0
hot_min = 50.0

[[trigger.thresholds]]
tier = "hot"
action = "meeting_request"
priority = "high"

[[trigger.thresholds]]
tier = "warm"
action = "outreach_log"
priority = "medium"

[trigger.meeting]
min_score = 50.0

[run]
parallelism = 4
"#;

// ── Loading ──────────────────────────────────────────────────────────────

#[test]
fn sample_config_loads_and_validates() {
    let config = RadarConfig::from_toml_str(SAMPLE).expect("sample config should load");
    assert_eq!(config.detection.movement_rules.len(), 2);
    assert_eq!(config.run.parallelism, 4);
    // Unspecified run knobs fall back to defaults.
    assert_eq!(config.run.max_retries, 3);
}

#[test]
fn missing_weight_fails_fast() {
    let broken = SAMPLE.replace("movement_hire = 30.0\n", "");
    let err = RadarConfig::from_toml_str(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::MissingWeight { .. }), "{err}");
}

#[test]
fn increasing_decay_factor_is_rejected() {
    let broken = SAMPLE.replace("factor = 0.4", "factor = 0.9");
    let err = RadarConfig::from_toml_str(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::NonMonotonicDecay { .. }), "{err}");
}

#[test]
fn zero_decay_floor_is_rejected() {
    let broken = SAMPLE.replace("decay_floor = 0.1", "decay_floor = 0.0");
    let err = RadarConfig::from_toml_str(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDecayFloor { .. }), "{err}");
}

#[test]
fn bad_rule_regex_is_rejected() {
    let broken = SAMPLE.replace(r#"pattern_a = "(?i)former|ex-""#, r#"pattern_a = "(unclosed""#);
    let err = RadarConfig::from_toml_str(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRulePattern { .. }), "{err}");
}

#[test]
fn inverted_tier_bounds_are_rejected() {
    let broken = SAMPLE.replace("high_min = 0.8", "high_min = 0.4");
    let err = RadarConfig::from_toml_str(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTierBounds { .. }), "{err}");
}

#[test]
fn zero_dedup_window_is_rejected() {
    let broken = SAMPLE.replace("dedup_window_hours = 72", "dedup_window_hours = 0");
    let err = RadarConfig::from_toml_str(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRunSetting { .. }), "{err}");
}

// ── Table lookups ────────────────────────────────────────────────────────

#[test]
fn decay_factor_steps_down_and_floors() {
    let config = RadarConfig::from_toml_str(SAMPLE).unwrap();
    let tables = &config.scoring;
    assert_eq!(tables.decay_factor(0), 1.0);
    assert_eq!(tables.decay_factor(7), 1.0);
    assert_eq!(tables.decay_factor(8), 0.7);
    assert_eq!(tables.decay_factor(90), 0.4);
    // Past the last band: the floor, never zero.
    assert_eq!(tables.decay_factor(1000), 0.1);
}

#[test]
fn unknown_source_uses_default_modifier() {
    let config = RadarConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.scoring.source_modifier("linkedin"), 1.2);
    assert_eq!(config.scoring.source_modifier("somewhere-new"), 1.0);
}

#[test]
fn weight_table_covers_every_signal_type() {
    let config = RadarConfig::from_toml_str(SAMPLE).unwrap();
    for signal_type in SignalType::ALL {
        assert!(config.scoring.weight(signal_type) > 0.0, "{signal_type}");
    }
}

// ── Tier boundaries ──────────────────────────────────────────────────────

#[test]
fn confidence_tiers_cover_the_unit_interval() {
    let config = RadarConfig::from_toml_str(SAMPLE).unwrap();
    let bounds = config.detection.confidence_tiers;
    assert_eq!(bounds.tier(0.0), ConfidenceTier::Low);
    assert_eq!(bounds.tier(0.49), ConfidenceTier::Low);
    assert_eq!(bounds.tier(0.5), ConfidenceTier::Medium);
    assert_eq!(bounds.tier(0.8), ConfidenceTier::High);
    assert_eq!(bounds.tier(1.0), ConfidenceTier::High);
}

#[test]
fn score_tiers_bucket_by_ordered_boundaries() {
    let config = RadarConfig::from_toml_str(SAMPLE).unwrap();
    let bounds = config.trigger.score_tiers;
    assert_eq!(bounds.tier(39.0), ScoreTier::Cold);
    assert_eq!(bounds.tier(40.0), ScoreTier::Warm);
    assert_eq!(bounds.tier(55.0), ScoreTier::Hot);
}
