use chrono::{DateTime, Utc};

use radar_core::models::{Signal, SignalType};
use radar_core::traits::IScoringTables;

/// Decay-weighted score formula.
///
/// ```text
/// raw     = Σ weight(type)
/// decayed = Σ weight(type) × decay_factor(age_days) × source_modifier(source)
/// ```
///
/// Recomputed from the full signal history on every invocation: the
/// function is re-entrant and self-corrects when weights or decay rules
/// change. Nothing here is incremental, so repeating a run can never
/// double-count a signal.
pub fn compute(
    signals: &[Signal],
    tables: &dyn IScoringTables,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let mut raw_score = 0.0;
    let mut decayed_score = 0.0;
    let mut last_signal_at: Option<DateTime<Utc>> = None;
    let mut per_signal = Vec::with_capacity(signals.len());

    for signal in signals {
        let weight = tables.weight(signal.signal_type);
        let age_days = signal.age_days(now);
        let decay_factor = tables.decay_factor(age_days);
        let source_modifier = tables.source_modifier(&signal.source);
        let contribution = weight * decay_factor * source_modifier;

        raw_score += weight;
        decayed_score += contribution;
        if last_signal_at.map_or(true, |t| signal.detected_at > t) {
            last_signal_at = Some(signal.detected_at);
        }

        per_signal.push(SignalContribution {
            signal_id: signal.id.clone(),
            signal_type: signal.signal_type,
            weight,
            age_days,
            decay_factor,
            source_modifier,
            contribution,
        });
    }

    ScoreBreakdown {
        raw_score,
        decayed_score,
        signal_count: signals.len(),
        last_signal_at,
        per_signal,
    }
}

/// Full score computation result with a per-signal audit trail.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub raw_score: f64,
    pub decayed_score: f64,
    pub signal_count: usize,
    pub last_signal_at: Option<DateTime<Utc>>,
    pub per_signal: Vec<SignalContribution>,
}

/// One signal's contribution to the decayed score.
#[derive(Debug, Clone)]
pub struct SignalContribution {
    pub signal_id: String,
    pub signal_type: SignalType,
    pub weight: f64,
    pub age_days: u64,
    pub decay_factor: f64,
    pub source_modifier: f64,
    pub contribution: f64,
}
