use chrono::{DateTime, Duration, Utc};

use radar_core::config::SafetyCapConfig;
use radar_core::models::Score;

/// Safety-cap check: the explicit kill-switch against feedback loops and
/// bad data spikes.
///
/// Before a new decayed score is persisted it is compared against the
/// previous persisted score for the same entity. If that score is recent
/// (inside the cap window) and the proposed increase exceeds the
/// configured maximum delta, the new value is clamped to
/// `previous + max_delta`. Decreases are never clamped.
#[derive(Debug, Clone)]
pub struct CapDecision {
    pub clamped: bool,
    pub proposed: f64,
    /// The value that will actually be persisted.
    pub persisted: f64,
    pub reason: String,
}

/// Evaluate the safety cap for a proposed decayed score.
pub fn evaluate(
    previous: Option<&Score>,
    proposed: f64,
    cap: &SafetyCapConfig,
    now: DateTime<Utc>,
) -> CapDecision {
    let window = Duration::hours(cap.window_hours as i64);
    let recent = previous.filter(|p| now - p.computed_at <= window);

    let Some(previous) = recent else {
        return CapDecision {
            clamped: false,
            proposed,
            persisted: proposed,
            reason: "no recent previous score".to_string(),
        };
    };

    let increase = proposed - previous.decayed_score;
    if increase <= cap.max_delta {
        return CapDecision {
            clamped: false,
            proposed,
            persisted: proposed,
            reason: "increase within cap".to_string(),
        };
    }

    let persisted = previous.decayed_score + cap.max_delta;
    tracing::warn!(
        entity = %previous.entity,
        previous = previous.decayed_score,
        proposed,
        persisted,
        max_delta = cap.max_delta,
        "safety cap clamped score increase"
    );
    CapDecision {
        clamped: true,
        proposed,
        persisted,
        reason: format!(
            "increase {:.1} exceeds max delta {:.1}, clamped {:.1} -> {:.1}",
            increase, cap.max_delta, proposed, persisted
        ),
    }
}
