//! Confidence composition for classified movements.
//!
//! `final = clamp(base × movement_modifier × completeness, 0, 1)`
//!
//! Pure functions of their inputs: same state and config always produce
//! the same confidence.

use radar_core::config::DetectionConfig;
use radar_core::models::{Confidence, ConfidenceTier, EntityState, MovementType, StateField};

/// Record-completeness factor.
///
/// Range: 0.8 – 1.0. Sparse records carry less corroborating evidence,
/// so their classifications are trusted slightly less.
pub fn completeness(state: &EntityState) -> f64 {
    let populated = StateField::ALL
        .iter()
        .filter(|f| state.field(**f).is_some())
        .count();
    0.8 + 0.2 * (populated as f64 / StateField::ALL.len() as f64)
}

/// Compose the final confidence for a movement from its rule's base
/// confidence, the configured per-movement-type modifier, and record
/// completeness.
pub fn compose(
    base_confidence: f64,
    movement_type: MovementType,
    new_state: &EntityState,
    config: &DetectionConfig,
) -> Confidence {
    let modifier = config.movement_modifier(movement_type);
    Confidence::new(base_confidence * modifier * completeness(new_state))
}

/// Bucket a confidence value via the configured boundaries.
pub fn tier(confidence: Confidence, config: &DetectionConfig) -> ConfidenceTier {
    config.confidence_tiers.tier(confidence.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_state() -> EntityState {
        EntityState {
            employer: Some("Acme".to_string()),
            title: Some("VP Sales".to_string()),
            seniority: Some("vp".to_string()),
            department: Some("sales".to_string()),
            location: Some("NYC".to_string()),
            employment_status: Some("active".to_string()),
        }
    }

    #[test]
    fn completeness_rewards_populated_records() {
        assert_eq!(completeness(&full_state()), 1.0);
        assert!(completeness(&EntityState::default()) < completeness(&full_state()));
    }

    #[test]
    fn compose_is_deterministic() {
        let config = DetectionConfig {
            hash_fields: vec![StateField::Employer],
            movement_rules: vec![],
            contradiction_rules: vec![],
            confidence_tiers: radar_core::config::ConfidenceTierBounds {
                medium_min: 0.5,
                high_min: 0.8,
            },
            movement_modifiers: Default::default(),
        };
        let state = full_state();
        let a = compose(0.9, MovementType::Hire, &state, &config);
        let b = compose(0.9, MovementType::Hire, &state, &config);
        assert_eq!(a, b);
    }
}
