use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use radar_core::config::{RadarConfig, RunConfig};
use radar_core::errors::{ConfigError, RadarError, RadarResult};
use radar_core::models::{Candidate, RunReport};
use radar_core::traits::IIntentStorage;

use crate::entity_pipeline::EntityPipeline;
use crate::locks::EntityLocks;

/// Batch runner: fetches the candidate lookback window and fans each
/// entity's pipeline out across a bounded worker pool.
pub struct Runner {
    pipeline: Arc<EntityPipeline>,
    run: RunConfig,
}

impl Runner {
    pub fn new(config: RadarConfig) -> Result<Self, ConfigError> {
        let run = config.run.clone();
        Ok(Self {
            pipeline: Arc::new(EntityPipeline::new(config)?),
            run,
        })
    }

    /// Process one batch. Per-entity errors never abort the run; they are
    /// counted and reported in the returned summary.
    pub async fn run(&self, storage: Arc<dyn IIntentStorage>) -> RadarResult<RunReport> {
        let mut report = RunReport::start(Utc::now());

        let candidates = {
            let storage = Arc::clone(&storage);
            let lookback = self.run.lookback_hours;
            let batch_size = self.run.batch_size;
            tokio::task::spawn_blocking(move || storage.get_candidates(lookback, batch_size))
                .await
                .map_err(|e| RadarError::EntityProcessing {
                    entity: "<candidates>".to_string(),
                    reason: e.to_string(),
                })??
        };
        tracing::info!(
            candidates = candidates.len(),
            lookback_hours = self.run.lookback_hours,
            "starting run"
        );

        let semaphore = Arc::new(Semaphore::new(self.run.parallelism));
        let locks = Arc::new(EntityLocks::new());
        let mut join_set = JoinSet::new();

        for candidate in candidates {
            // Acquiring before spawning bounds in-flight work; the run is
            // interruptible between entities at this point.
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|_| RadarError::EntityProcessing {
                    entity: candidate.entity.to_string(),
                    reason: "worker pool closed".to_string(),
                })?;

            let pipeline = Arc::clone(&self.pipeline);
            let storage = Arc::clone(&storage);
            let locks = Arc::clone(&locks);
            let run = self.run.clone();
            join_set.spawn(async move {
                let _permit = permit;
                let entity = candidate.entity.clone();
                let _guard = locks.acquire(&entity).await;

                let work = process_with_retries(pipeline, storage, candidate, &run);
                let timeout = Duration::from_secs(run.entity_timeout_secs);
                match tokio::time::timeout(timeout, work).await {
                    Ok(result) => (entity, result),
                    Err(_) => (
                        entity.clone(),
                        Err(RadarError::EntityProcessing {
                            entity: entity.to_string(),
                            reason: format!("timed out after {}s", run.entity_timeout_secs),
                        }),
                    ),
                }
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((_, Ok(entity_report))) => report.absorb(&entity_report),
                Ok((entity, Err(e))) => {
                    if e.is_transient() {
                        tracing::warn!(entity = %entity, error = %e, "entity skipped after retries");
                        report.skipped += 1;
                    } else {
                        tracing::warn!(entity = %entity, error = %e, "entity failed");
                        report.errored += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "entity task panicked");
                    report.errored += 1;
                }
            }
        }

        report.finish(Utc::now());
        tracing::info!(
            processed = report.processed,
            movements = report.movements,
            fired = report.triggers_fired,
            suppressed = report.triggers_suppressed,
            clamps = report.clamps,
            errored = report.errored,
            skipped = report.skipped,
            "run finished"
        );
        Ok(report)
    }
}

/// Run one entity's pipeline, retrying transient storage errors a bounded
/// number of times. Exhausted retries surface the last transient error.
async fn process_with_retries(
    pipeline: Arc<EntityPipeline>,
    storage: Arc<dyn IIntentStorage>,
    candidate: Candidate,
    run: &RunConfig,
) -> RadarResult<RunReport> {
    let mut attempt = 0;
    loop {
        let pipeline = Arc::clone(&pipeline);
        let storage = Arc::clone(&storage);
        let candidate_for_attempt = candidate.clone();
        let result = tokio::task::spawn_blocking(move || {
            pipeline.process(&*storage, &candidate_for_attempt, Utc::now())
        })
        .await
        .map_err(|e| RadarError::EntityProcessing {
            entity: candidate.entity.to_string(),
            reason: e.to_string(),
        })?;

        match result {
            Ok(report) => return Ok(report),
            Err(e) if e.is_transient() && attempt < run.max_retries => {
                attempt += 1;
                tracing::warn!(
                    entity = %candidate.entity,
                    attempt,
                    error = %e,
                    "transient storage error, retrying"
                );
                tokio::time::sleep(Duration::from_millis(100 * u64::from(attempt))).await;
            }
            Err(e) => return Err(e),
        }
    }
}
