use radar_core::config::{ContradictionRule, DetectionConfig};
use radar_core::errors::ConfigError;
use radar_core::models::{ChangeSet, Contradiction, EntityState, FieldChange, Snapshot, StateField};

use crate::hash::state_hash;

/// A contradiction rule with its patterns compiled once at startup.
struct CompiledContradictionRule {
    id: String,
    field_a: StateField,
    pattern_a: regex::Regex,
    field_b: StateField,
    pattern_b: regex::Regex,
}

impl CompiledContradictionRule {
    fn compile(rule: &ContradictionRule) -> Result<Self, ConfigError> {
        let compile = |pattern: &str| {
            regex::Regex::new(pattern).map_err(|e| ConfigError::InvalidRulePattern {
                rule_id: rule.id.clone(),
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            id: rule.id.clone(),
            field_a: rule.field_a,
            pattern_a: compile(&rule.pattern_a)?,
            field_b: rule.field_b,
            pattern_b: compile(&rule.pattern_b)?,
        })
    }
}

/// Compares newly observed state against the stored snapshot.
///
/// The detector itself is read-only; the pipeline upserts the snapshot on
/// every pass (changed or not) so subsequent runs compare against current
/// truth and a single change never alerts twice.
pub struct ChangeDetector {
    hash_fields: Vec<StateField>,
    contradiction_rules: Vec<CompiledContradictionRule>,
}

impl ChangeDetector {
    pub fn new(config: &DetectionConfig) -> Result<Self, ConfigError> {
        let contradiction_rules = config
            .contradiction_rules
            .iter()
            .map(CompiledContradictionRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            hash_fields: config.hash_fields.clone(),
            contradiction_rules,
        })
    }

    /// Hash the observable state over the configured field subset.
    pub fn hash(&self, state: &EntityState) -> String {
        state_hash(state, &self.hash_fields)
    }

    /// Diff stored snapshot against newly observed state.
    ///
    /// Absent snapshot is the first-seen case: reported as different so
    /// the caller baselines the snapshot, but flagged `first_seen` so no
    /// movement is classified from it.
    pub fn detect(&self, old: Option<&Snapshot>, new_state: &EntityState) -> ChangeSet {
        let old = match old {
            Some(snapshot) => snapshot,
            None => {
                return ChangeSet {
                    changes: vec![],
                    is_different: true,
                    first_seen: true,
                }
            }
        };

        let is_different = self.hash(new_state) != old.content_hash;
        if !is_different {
            return ChangeSet::default();
        }

        let mut changes = Vec::new();
        for field in StateField::ALL {
            let old_value = old.state.field(field);
            let new_value = new_state.field(field);
            if old_value != new_value {
                changes.push(FieldChange {
                    field,
                    old_value: old_value.map(str::to_string),
                    new_value: new_value.map(str::to_string),
                });
            }
        }

        ChangeSet {
            changes,
            is_different: true,
            first_seen: false,
        }
    }

    /// Flag fields implying mutually exclusive transitions. Contradictions
    /// are surfaced for manual review and never block processing.
    pub fn check_contradictions(&self, state: &EntityState) -> Vec<Contradiction> {
        let mut found = Vec::new();
        for rule in &self.contradiction_rules {
            let a = state.field(rule.field_a);
            let b = state.field(rule.field_b);
            let (Some(a), Some(b)) = (a, b) else { continue };
            if rule.pattern_a.is_match(a) && rule.pattern_b.is_match(b) {
                tracing::warn!(
                    rule_id = %rule.id,
                    field_a = %rule.field_a,
                    field_b = %rule.field_b,
                    "contradictory field values observed"
                );
                found.push(Contradiction {
                    rule_id: rule.id.clone(),
                    fields: (rule.field_a, rule.field_b),
                    description: format!(
                        "{} value '{}' conflicts with {} value '{}'",
                        rule.field_a, a, rule.field_b, b
                    ),
                });
            }
        }
        found
    }
}
