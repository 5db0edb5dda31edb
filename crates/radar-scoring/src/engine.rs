use chrono::{DateTime, Utc};

use radar_core::config::{SafetyCapConfig, ScoreTierBounds};
use radar_core::models::{EntityRef, Score, ScoreTier, Signal};
use radar_core::traits::IScoringTables;

use crate::formula::{self, ScoreBreakdown};
use crate::safety::{self, CapDecision};

/// Score engine: recomputes an entity's score from its full signal
/// history and enforces the safety cap before the result is persisted.
pub struct ScoreEngine {
    tier_bounds: ScoreTierBounds,
    safety_cap: SafetyCapConfig,
}

impl ScoreEngine {
    pub fn new(tier_bounds: ScoreTierBounds, safety_cap: SafetyCapConfig) -> Self {
        Self {
            tier_bounds,
            safety_cap,
        }
    }

    /// Compute raw and decayed scores over the full signal history.
    pub fn compute(
        &self,
        signals: &[Signal],
        tables: &dyn IScoringTables,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        formula::compute(signals, tables, now)
    }

    /// Bucket a decayed score via the configured boundaries.
    pub fn tier(&self, decayed_score: f64) -> ScoreTier {
        self.tier_bounds.tier(decayed_score)
    }

    /// Evaluate the safety cap against the previously persisted score.
    pub fn evaluate_cap(
        &self,
        previous: Option<&Score>,
        proposed: f64,
        now: DateTime<Utc>,
    ) -> CapDecision {
        safety::evaluate(previous, proposed, &self.safety_cap, now)
    }

    /// Assemble the persistable score row for an entity: compute, cap,
    /// tier. The caller upserts the result and marks the incorporated
    /// signals as scored.
    pub fn build_score(
        &self,
        entity: &EntityRef,
        breakdown: &ScoreBreakdown,
        previous: Option<&Score>,
        now: DateTime<Utc>,
    ) -> (Score, CapDecision) {
        let cap = self.evaluate_cap(previous, breakdown.decayed_score, now);
        let score = Score {
            entity: entity.clone(),
            raw_score: breakdown.raw_score,
            decayed_score: cap.persisted,
            tier: self.tier(cap.persisted),
            signal_count: breakdown.signal_count,
            last_signal_at: breakdown.last_signal_at,
            computed_at: now,
            clamped: cap.clamped,
        };
        (score, cap)
    }
}
