use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::{ConfidenceTier, MovementType, StateField};

/// How a field must have changed for a rule condition to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangePattern {
    /// The field value differs in any way.
    Changed,
    /// The field went from absent to present.
    Gained,
    /// The field went from present to absent.
    Cleared,
}

/// A single precondition on the change set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCondition {
    pub field: StateField,
    pub change: ChangePattern,
    /// Optional regex the new value must match (ignored for `Cleared`).
    #[serde(default)]
    pub new_value_pattern: Option<String>,
}

/// A movement classification rule. Rules are evaluated in declaration
/// order; the first rule whose conditions all hold wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRule {
    pub id: String,
    pub movement: MovementType,
    pub base_confidence: f64,
    pub conditions: Vec<FieldCondition>,
}

/// A contradiction rule: the new state matching both patterns flags a
/// conflict. Which field combinations count as contradictory is operator
/// configuration, not engine code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContradictionRule {
    pub id: String,
    pub field_a: StateField,
    pub pattern_a: String,
    pub field_b: StateField,
    pub pattern_b: String,
}

/// Ordered confidence tier boundaries covering [0,1]:
/// [0, medium_min) → low, [medium_min, high_min) → medium,
/// [high_min, 1] → high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceTierBounds {
    pub medium_min: f64,
    pub high_min: f64,
}

impl ConfidenceTierBounds {
    pub fn tier(&self, confidence: f64) -> ConfidenceTier {
        if confidence >= self.high_min {
            ConfidenceTier::High
        } else if confidence >= self.medium_min {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// Change detection and movement classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Ordered field subset the content hash is computed over. Excludes
    /// volatile fields so unrelated churn never triggers false positives.
    pub hash_fields: Vec<StateField>,
    pub movement_rules: Vec<MovementRule>,
    #[serde(default)]
    pub contradiction_rules: Vec<ContradictionRule>,
    pub confidence_tiers: ConfidenceTierBounds,
    /// Per-movement-type confidence modifiers; absent types use 1.0.
    #[serde(default)]
    pub movement_modifiers: HashMap<MovementType, f64>,
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hash_fields.is_empty() {
            return Err(ConfigError::InvalidRunSetting {
                key: "detection.hash_fields".to_string(),
                reason: "must name at least one field".to_string(),
            });
        }
        if self.movement_rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }

        for rule in &self.movement_rules {
            if rule.conditions.is_empty() {
                return Err(ConfigError::InvalidRunSetting {
                    key: format!("detection.movement_rules.{}", rule.id),
                    reason: "rule must have at least one condition".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&rule.base_confidence) || rule.base_confidence == 0.0 {
                return Err(ConfigError::InvalidTierBounds {
                    kind: format!("rule '{}' base_confidence", rule.id),
                    reason: format!("must be in (0,1], got {}", rule.base_confidence),
                });
            }
            for cond in &rule.conditions {
                if let Some(pattern) = &cond.new_value_pattern {
                    regex::Regex::new(pattern).map_err(|e| ConfigError::InvalidRulePattern {
                        rule_id: rule.id.clone(),
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })?;
                }
            }
        }

        for rule in &self.contradiction_rules {
            for pattern in [&rule.pattern_a, &rule.pattern_b] {
                regex::Regex::new(pattern).map_err(|e| ConfigError::InvalidRulePattern {
                    rule_id: rule.id.clone(),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            }
        }

        let bounds = &self.confidence_tiers;
        if !(bounds.medium_min > 0.0 && bounds.medium_min < bounds.high_min && bounds.high_min <= 1.0)
        {
            return Err(ConfigError::InvalidTierBounds {
                kind: "confidence".to_string(),
                reason: format!(
                    "require 0 < medium_min < high_min <= 1, got {} and {}",
                    bounds.medium_min, bounds.high_min
                ),
            });
        }

        Ok(())
    }

    /// Confidence modifier for a movement type (1.0 when unconfigured).
    pub fn movement_modifier(&self, movement: MovementType) -> f64 {
        self.movement_modifiers.get(&movement).copied().unwrap_or(1.0)
    }
}
