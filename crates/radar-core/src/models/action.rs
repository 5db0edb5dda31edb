use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityRef;
use super::score::ScoreTier;

/// Downstream side effects the trigger evaluator may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Log an outreach event for the sales workflow.
    OutreachLog,
    /// Queue a meeting request for immediate human follow-up.
    MeetingRequest,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::OutreachLog => "outreach_log",
            ActionType::MeetingRequest => "meeting_request",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action priority, ordered: comparisons pick the highest-priority
/// threshold when score bands overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An emitted side effect. Created at most once per (entity, action type)
/// within the deduplication window; never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerAction {
    /// UUID v4 identifier.
    pub id: String,
    pub entity: EntityRef,
    pub action_type: ActionType,
    pub priority: Priority,
    pub triggering_score: f64,
    pub triggering_tier: ScoreTier,
    /// Human-readable summary of the score delta and the crossed threshold.
    pub reason: String,
    /// Free-form context (queued-meeting details, score breakdown).
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
