use radar_core::config::{ChangePattern, DetectionConfig, FieldCondition, MovementRule};
use radar_core::errors::ConfigError;
use radar_core::models::{ChangeSet, EntityState, MovementType};

/// A movement rule with its value patterns compiled once at startup.
struct CompiledRule {
    id: String,
    movement: MovementType,
    base_confidence: f64,
    conditions: Vec<CompiledCondition>,
}

struct CompiledCondition {
    condition: FieldCondition,
    new_value_pattern: Option<regex::Regex>,
}

impl CompiledRule {
    fn compile(rule: &MovementRule) -> Result<Self, ConfigError> {
        let conditions = rule
            .conditions
            .iter()
            .map(|condition| {
                let new_value_pattern = condition
                    .new_value_pattern
                    .as_deref()
                    .map(regex::Regex::new)
                    .transpose()
                    .map_err(|e| ConfigError::InvalidRulePattern {
                        rule_id: rule.id.clone(),
                        pattern: condition.new_value_pattern.clone().unwrap_or_default(),
                        message: e.to_string(),
                    })?;
                Ok(CompiledCondition {
                    condition: condition.clone(),
                    new_value_pattern,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            id: rule.id.clone(),
            movement: rule.movement,
            base_confidence: rule.base_confidence,
            conditions,
        })
    }
}

/// The winning rule match: movement type plus base confidence and the
/// rule ids that fired, for the audit trail on the persisted movement.
#[derive(Debug, Clone)]
pub struct MovementMatch {
    pub movement_type: MovementType,
    pub base_confidence: f64,
    pub matched_rules: Vec<String>,
}

/// Ordered-rule movement classifier. Rules are evaluated in declaration
/// order and the first fully-satisfied rule wins; an unclassifiable
/// change returns `None`, never an error.
pub struct MovementClassifier {
    rules: Vec<CompiledRule>,
}

impl MovementClassifier {
    pub fn new(config: &DetectionConfig) -> Result<Self, ConfigError> {
        let rules = config
            .movement_rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Classify a detected change. First-seen baselines and no-op change
    /// sets never classify.
    pub fn classify(&self, new_state: &EntityState, change_set: &ChangeSet) -> Option<MovementMatch> {
        if change_set.first_seen || !change_set.is_different {
            return None;
        }

        for rule in &self.rules {
            if rule
                .conditions
                .iter()
                .all(|c| condition_holds(c, new_state, change_set))
            {
                return Some(MovementMatch {
                    movement_type: rule.movement,
                    base_confidence: rule.base_confidence,
                    matched_rules: vec![rule.id.clone()],
                });
            }
        }

        tracing::info!(
            changed_fields = change_set.changes.len(),
            "change did not match any movement rule"
        );
        None
    }
}

fn condition_holds(
    compiled: &CompiledCondition,
    new_state: &EntityState,
    change_set: &ChangeSet,
) -> bool {
    let condition = &compiled.condition;
    let Some(change) = change_set.change_for(condition.field) else {
        return false;
    };

    let change_ok = match condition.change {
        ChangePattern::Changed => true,
        ChangePattern::Gained => change.gained(),
        ChangePattern::Cleared => change.cleared(),
    };
    if !change_ok {
        return false;
    }

    // The value pattern applies to the new value; a cleared field has none.
    if condition.change == ChangePattern::Cleared {
        return true;
    }

    match &compiled.new_value_pattern {
        Some(pattern) => new_state
            .field(condition.field)
            .is_some_and(|value| pattern.is_match(value)),
        None => true,
    }
}
