use chrono::{DateTime, Utc};

use radar_core::config::{TriggerConfig, TriggerThreshold};
use radar_core::models::{ActionType, EntityContext, Score, TriggerAction};
use radar_core::traits::IIntentStorage;

/// Per-invocation evaluation states. Each score update enters the machine
/// fresh at `Idle` and ends in one of the two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Evaluating,
    Fired,
    Suppressed,
}

/// Terminal result of one evaluation, with the action to persist when the
/// machine ended in `Fired`.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub state: TriggerState,
    /// Present iff `state == Fired`. The caller persists it.
    pub action: Option<TriggerAction>,
    pub reason: String,
}

impl EvaluationOutcome {
    fn suppressed(reason: impl Into<String>) -> Self {
        Self {
            state: TriggerState::Suppressed,
            action: None,
            reason: reason.into(),
        }
    }

    pub fn fired(&self) -> bool {
        self.state == TriggerState::Fired
    }
}

/// Evaluates a freshly computed score against the threshold table.
pub struct TriggerEvaluator {
    config: TriggerConfig,
}

impl TriggerEvaluator {
    pub fn new(config: TriggerConfig) -> Self {
        Self { config }
    }

    /// Run the state machine for one score update.
    ///
    /// Suppression cases, in order: no threshold matches the tier, the
    /// tier did not change relative to the previous persisted score, or
    /// an action of the same type already fired inside the dedup window.
    /// A dedup-store failure suppresses rather than risking a duplicate.
    pub fn evaluate(
        &self,
        score: &Score,
        previous: Option<&Score>,
        context: &EntityContext,
        storage: &dyn IIntentStorage,
        now: DateTime<Utc>,
    ) -> EvaluationOutcome {
        let Some(threshold) = self.matching_threshold(score) else {
            return EvaluationOutcome::suppressed(format!(
                "no threshold crossed at tier {}",
                score.tier
            ));
        };

        if let Some(previous) = previous {
            if previous.tier == score.tier {
                return EvaluationOutcome::suppressed(format!(
                    "tier {} unchanged since last evaluation",
                    score.tier
                ));
            }
        }

        let action_type = self.resolve_action_type(threshold, score, context);

        match storage.get_recent_action(&score.entity, action_type, self.config.dedup_window_hours)
        {
            Ok(true) => {
                return EvaluationOutcome::suppressed(format!(
                    "{} already fired within {}h window",
                    action_type, self.config.dedup_window_hours
                ));
            }
            Ok(false) => {}
            Err(e) => {
                // Fail closed: a missed trigger beats duplicate spam.
                tracing::warn!(
                    entity = %score.entity,
                    error = %e,
                    "dedup store unavailable, suppressing trigger"
                );
                return EvaluationOutcome::suppressed("dedup store unavailable, failing closed");
            }
        }

        let reason = self.describe(score, previous, threshold);
        let metadata = self.action_metadata(action_type, score, context);
        let action = TriggerAction {
            id: uuid::Uuid::new_v4().to_string(),
            entity: score.entity.clone(),
            action_type,
            priority: threshold.priority,
            triggering_score: score.decayed_score,
            triggering_tier: score.tier,
            reason: reason.clone(),
            metadata,
            created_at: now,
        };

        tracing::info!(
            entity = %score.entity,
            action = %action_type,
            priority = %threshold.priority,
            score = score.decayed_score,
            "trigger fired"
        );
        EvaluationOutcome {
            state: TriggerState::Fired,
            action: Some(action),
            reason,
        }
    }

    /// Highest-priority threshold matching the score's tier.
    fn matching_threshold(&self, score: &Score) -> Option<&TriggerThreshold> {
        self.config
            .thresholds
            .iter()
            .filter(|t| t.tier == score.tier)
            .max_by_key(|t| t.priority)
    }

    /// Meeting requests carry an extra eligibility gate: a minimum score
    /// and a reachable contact. Ineligible entities still get the
    /// outreach log entry rather than nothing.
    fn resolve_action_type(
        &self,
        threshold: &TriggerThreshold,
        score: &Score,
        context: &EntityContext,
    ) -> ActionType {
        if threshold.action != ActionType::MeetingRequest {
            return threshold.action;
        }
        let eligible =
            score.decayed_score >= self.config.meeting.min_score && context.has_contact_info();
        if eligible {
            ActionType::MeetingRequest
        } else {
            tracing::info!(
                entity = %score.entity,
                score = score.decayed_score,
                "meeting ineligible, downgrading to outreach log"
            );
            ActionType::OutreachLog
        }
    }

    fn describe(
        &self,
        score: &Score,
        previous: Option<&Score>,
        threshold: &TriggerThreshold,
    ) -> String {
        match previous {
            Some(previous) => format!(
                "score {:.1} -> {:.1} crossed {} threshold (tier {} -> {})",
                previous.decayed_score,
                score.decayed_score,
                threshold.tier,
                previous.tier,
                score.tier
            ),
            None => format!(
                "score {:.1} crossed {} threshold on first evaluation",
                score.decayed_score, threshold.tier
            ),
        }
    }

    fn action_metadata(
        &self,
        action_type: ActionType,
        score: &Score,
        context: &EntityContext,
    ) -> serde_json::Value {
        match action_type {
            ActionType::MeetingRequest => serde_json::json!({
                "meeting": {
                    "contact_email": context.email,
                    "contact_name": context.full_name,
                    "company": context.company_name,
                },
                "signal_count": score.signal_count,
            }),
            ActionType::OutreachLog => serde_json::json!({
                "signal_count": score.signal_count,
            }),
        }
    }
}
