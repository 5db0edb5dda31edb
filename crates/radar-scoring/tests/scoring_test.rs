use std::collections::HashMap;

use chrono::{Duration, Utc};
use radar_core::config::{DecayBand, SafetyCapConfig, ScoreTierBounds, ScoringConfig};
use radar_core::models::{EntityRef, Score, ScoreTier, Signal, SignalType};
use radar_scoring::ScoreEngine;

fn tables() -> ScoringConfig {
    let weights: HashMap<SignalType, f64> = SignalType::ALL
        .iter()
        .map(|t| {
            let w = match t {
                SignalType::MovementHire => 30.0,
                SignalType::MovementExit => 25.0,
                SignalType::MovementPromotion => 20.0,
                SignalType::MovementTransfer => 15.0,
                SignalType::ProfileView => 5.0,
                SignalType::EmailOpen => 3.0,
                SignalType::EmailClick => 8.0,
                SignalType::WebsiteVisit => 6.0,
                SignalType::ContentDownload => 10.0,
            };
            (*t, w)
        })
        .collect();

    ScoringConfig {
        weights,
        decay_bands: vec![
            DecayBand { max_age_days: 7, factor: 1.0 },
            DecayBand { max_age_days: 30, factor: 0.7 },
            DecayBand { max_age_days: 90, factor: 0.4 },
        ],
        decay_floor: 0.1,
        source_modifiers: HashMap::from([("linkedin".to_string(), 1.2)]),
        default_source_modifier: 1.0,
        safety_cap: SafetyCapConfig {
            max_delta: 25.0,
            window_hours: 24,
        },
    }
}

fn engine() -> ScoreEngine {
    ScoreEngine::new(
        ScoreTierBounds {
            warm_min: 40.0,
            hot_min: 50.0,
        },
        tables().safety_cap,
    )
}

fn signal_aged(signal_type: SignalType, source: &str, days_ago: i64) -> Signal {
    Signal::new(
        EntityRef::new("p1", "o1"),
        signal_type,
        source,
        Utc::now() - Duration::days(days_ago),
    )
}

// ── Formula ──────────────────────────────────────────────────────────────

#[test]
fn raw_score_sums_configured_weights() {
    let signals = vec![
        signal_aged(SignalType::MovementHire, "crm", 0),
        signal_aged(SignalType::EmailClick, "crm", 0),
    ];
    let breakdown = engine().compute(&signals, &tables(), Utc::now());
    assert_eq!(breakdown.raw_score, 38.0);
    assert_eq!(breakdown.signal_count, 2);
}

#[test]
fn decay_and_source_modifier_apply_per_signal() {
    // 10 days old: second band (0.7); linkedin source: 1.2.
    let signals = vec![signal_aged(SignalType::MovementHire, "linkedin", 10)];
    let breakdown = engine().compute(&signals, &tables(), Utc::now());
    let expected = 30.0 * 0.7 * 1.2;
    assert!((breakdown.decayed_score - expected).abs() < 1e-9);

    let contribution = &breakdown.per_signal[0];
    assert_eq!(contribution.decay_factor, 0.7);
    assert_eq!(contribution.source_modifier, 1.2);
}

#[test]
fn ancient_signals_floor_but_never_vanish() {
    let signals = vec![signal_aged(SignalType::ContentDownload, "crm", 2000)];
    let breakdown = engine().compute(&signals, &tables(), Utc::now());
    assert!((breakdown.decayed_score - 10.0 * 0.1).abs() < 1e-9);
    assert!(breakdown.decayed_score > 0.0);
}

#[test]
fn recomputation_is_idempotent() {
    let signals = vec![
        signal_aged(SignalType::MovementHire, "linkedin", 3),
        signal_aged(SignalType::ProfileView, "web", 12),
        signal_aged(SignalType::EmailOpen, "crm", 45),
    ];
    let now = Utc::now();
    let first = engine().compute(&signals, &tables(), now);
    let second = engine().compute(&signals, &tables(), now);
    assert_eq!(first.raw_score, second.raw_score);
    assert_eq!(first.decayed_score, second.decayed_score);
}

#[test]
fn empty_history_scores_zero() {
    let breakdown = engine().compute(&[], &tables(), Utc::now());
    assert_eq!(breakdown.raw_score, 0.0);
    assert_eq!(breakdown.decayed_score, 0.0);
    assert!(breakdown.last_signal_at.is_none());
}

#[test]
fn last_signal_at_tracks_newest_signal() {
    let newest = Utc::now() - Duration::days(1);
    let signals = vec![
        signal_aged(SignalType::EmailOpen, "crm", 20),
        Signal::new(EntityRef::new("p1", "o1"), SignalType::ProfileView, "web", newest),
        signal_aged(SignalType::EmailOpen, "crm", 5),
    ];
    let breakdown = engine().compute(&signals, &tables(), Utc::now());
    assert_eq!(breakdown.last_signal_at, Some(newest));
}

// ── Safety cap ───────────────────────────────────────────────────────────

fn previous_score(decayed: f64, hours_ago: i64) -> Score {
    Score {
        entity: EntityRef::new("p1", "o1"),
        raw_score: decayed,
        decayed_score: decayed,
        tier: ScoreTier::Cold,
        signal_count: 1,
        last_signal_at: None,
        computed_at: Utc::now() - Duration::hours(hours_ago),
        clamped: false,
    }
}

#[test]
fn oversized_increase_is_clamped_to_previous_plus_max_delta() {
    let previous = previous_score(30.0, 1);
    let decision = engine().evaluate_cap(Some(&previous), 70.0, Utc::now());
    assert!(decision.clamped);
    assert_eq!(decision.persisted, 55.0);
    assert_eq!(decision.proposed, 70.0);
}

#[test]
fn increase_within_delta_is_untouched() {
    let previous = previous_score(30.0, 1);
    let decision = engine().evaluate_cap(Some(&previous), 50.0, Utc::now());
    assert!(!decision.clamped);
    assert_eq!(decision.persisted, 50.0);
}

#[test]
fn stale_previous_score_does_not_cap() {
    // Previous score is outside the 24h window: jump allowed.
    let previous = previous_score(30.0, 48);
    let decision = engine().evaluate_cap(Some(&previous), 100.0, Utc::now());
    assert!(!decision.clamped);
    assert_eq!(decision.persisted, 100.0);
}

#[test]
fn decreases_are_never_clamped() {
    let previous = previous_score(80.0, 1);
    let decision = engine().evaluate_cap(Some(&previous), 20.0, Utc::now());
    assert!(!decision.clamped);
    assert_eq!(decision.persisted, 20.0);
}

#[test]
fn first_score_has_no_cap() {
    let decision = engine().evaluate_cap(None, 500.0, Utc::now());
    assert!(!decision.clamped);
}

// ── Score assembly ───────────────────────────────────────────────────────

#[test]
fn built_score_tiers_from_the_persisted_value() {
    // Proposed 90 would be hot, but the cap holds it at 30 + 25 = 55,
    // which still crosses the hot boundary; the tier must come from the
    // clamped value, not the proposed one.
    let entity = EntityRef::new("p1", "o1");
    let signals = vec![
        signal_aged(SignalType::MovementHire, "linkedin", 0),
        signal_aged(SignalType::MovementExit, "linkedin", 0),
        signal_aged(SignalType::ContentDownload, "linkedin", 0),
        signal_aged(SignalType::EmailClick, "linkedin", 0),
    ];
    let now = Utc::now();
    let breakdown = engine().compute(&signals, &tables(), now);
    assert!(breakdown.decayed_score > 80.0);

    let previous = previous_score(30.0, 1);
    let (score, cap) = engine().build_score(&entity, &breakdown, Some(&previous), now);
    assert!(cap.clamped);
    assert_eq!(score.decayed_score, 55.0);
    assert_eq!(score.tier, ScoreTier::Hot);
    assert!(score.clamped);
}
