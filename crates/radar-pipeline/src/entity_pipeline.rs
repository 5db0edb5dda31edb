use chrono::{DateTime, Utc};

use radar_core::config::RadarConfig;
use radar_core::errors::{ConfigError, RadarResult};
use radar_core::models::{Candidate, Movement, RunReport, Signal, Snapshot};
use radar_core::traits::IIntentStorage;
use radar_movement::{confidence, ChangeDetector, MovementClassifier};
use radar_scoring::ScoreEngine;
use radar_trigger::{TriggerEvaluator, TriggerState};

/// Source recorded on signals the classifier emits itself.
const DETECTOR_SOURCE: &str = "movement_detector";

/// The full pipeline for one entity, strictly sequential:
/// detect → classify → persist movement/signal → recompute score →
/// evaluate trigger → persist action. Across entities nothing is shared
/// or ordered.
pub struct EntityPipeline {
    detector: ChangeDetector,
    classifier: MovementClassifier,
    score_engine: ScoreEngine,
    evaluator: TriggerEvaluator,
    config: RadarConfig,
}

impl EntityPipeline {
    pub fn new(config: RadarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            detector: ChangeDetector::new(&config.detection)?,
            classifier: MovementClassifier::new(&config.detection)?,
            score_engine: ScoreEngine::new(
                config.trigger.score_tiers,
                config.scoring.safety_cap.clone(),
            ),
            evaluator: TriggerEvaluator::new(config.trigger.clone()),
            config,
        })
    }

    /// Process one candidate. Each invocation is its own atomic unit: an
    /// interrupted run leaves every processed entity consistent and the
    /// rest untouched for the next run.
    pub fn process(
        &self,
        storage: &dyn IIntentStorage,
        candidate: &Candidate,
        now: DateTime<Utc>,
    ) -> RadarResult<RunReport> {
        let mut report = RunReport::start(now);
        let entity = &candidate.entity;

        // Detect against the stored snapshot.
        let old = storage.get_snapshot(entity)?;
        let change_set = self.detector.detect(old.as_ref(), &candidate.state);

        let contradictions = self.detector.check_contradictions(&candidate.state);
        report.contradictions += contradictions.len();

        // Snapshot is updated on every pass, changed or not, so the next
        // run compares against current truth and one change never alerts
        // twice.
        storage.put_snapshot(&Snapshot {
            entity: entity.clone(),
            state: candidate.state.clone(),
            content_hash: self.detector.hash(&candidate.state),
            observed_at: now,
        })?;

        if change_set.is_different && !change_set.first_seen {
            report.changed += 1;
        }

        // Classify; a real-but-unclassifiable change is not an error.
        if let Some(matched) = self.classifier.classify(&candidate.state, &change_set) {
            let final_confidence = confidence::compose(
                matched.base_confidence,
                matched.movement_type,
                &candidate.state,
                &self.config.detection,
            );
            let movement = Movement {
                id: uuid::Uuid::new_v4().to_string(),
                entity: entity.clone(),
                movement_type: matched.movement_type,
                confidence: final_confidence,
                confidence_tier: confidence::tier(final_confidence, &self.config.detection),
                matched_rules: matched.matched_rules,
                old_state: old.map(|s| s.state),
                new_state: candidate.state.clone(),
                detected_at: now,
            };
            storage.insert_movement(&movement)?;

            // The movement's signal must be persisted before scoring so
            // the recomputation below already sees it.
            storage.insert_signal(&Signal::new(
                entity.clone(),
                matched.movement_type.signal_type(),
                DETECTOR_SOURCE,
                now,
            ))?;
            report.movements += 1;
        }

        // Recompute the score from the full signal history.
        let signals = storage.get_signals(entity, true)?;
        let previous = storage.get_score(entity)?;
        let breakdown = self
            .score_engine
            .compute(&signals, &self.config.scoring, now);
        let (score, cap) =
            self.score_engine
                .build_score(entity, &breakdown, previous.as_ref(), now);
        if cap.clamped {
            report.clamps += 1;
        }
        storage.upsert_score(&score)?;

        let newly_scored: Vec<String> = signals
            .iter()
            .filter(|s| !s.scored)
            .map(|s| s.id.clone())
            .collect();
        report.signals_scored += newly_scored.len();
        storage.mark_scored(&newly_scored)?;

        // Evaluate the trigger against the pre-update score.
        let outcome =
            self.evaluator
                .evaluate(&score, previous.as_ref(), &candidate.context, storage, now);
        match (outcome.state, outcome.action) {
            (TriggerState::Fired, Some(action)) => {
                storage.insert_action(&action)?;
                report.triggers_fired += 1;
            }
            _ => {
                tracing::debug!(entity = %entity, reason = %outcome.reason, "trigger suppressed");
                report.triggers_suppressed += 1;
            }
        }

        report.processed += 1;
        report.finish(Utc::now());
        Ok(report)
    }
}
