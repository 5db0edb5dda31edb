use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-run statistics, threaded explicitly through the pipeline and
/// returned. Concurrent runs never share this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Entities whose pipeline completed.
    pub processed: usize,
    /// Entities whose observed state differed from the stored snapshot.
    pub changed: usize,
    /// Movements classified and persisted.
    pub movements: usize,
    /// Signals newly incorporated into a score this run.
    pub signals_scored: usize,
    pub triggers_fired: usize,
    pub triggers_suppressed: usize,
    pub contradictions: usize,
    /// Safety-cap clamps applied.
    pub clamps: usize,
    /// Entities that failed with a non-transient error.
    pub errored: usize,
    /// Entities skipped after exhausting transient-error retries.
    pub skipped: usize,
}

impl RunReport {
    pub fn start(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            processed: 0,
            changed: 0,
            movements: 0,
            signals_scored: 0,
            triggers_fired: 0,
            triggers_suppressed: 0,
            contradictions: 0,
            clamps: 0,
            errored: 0,
            skipped: 0,
        }
    }

    /// Fold one entity's outcome counters into the run totals.
    pub fn absorb(&mut self, other: &RunReport) {
        self.processed += other.processed;
        self.changed += other.changed;
        self.movements += other.movements;
        self.signals_scored += other.signals_scored;
        self.triggers_fired += other.triggers_fired;
        self.triggers_suppressed += other.triggers_suppressed;
        self.contradictions += other.contradictions;
        self.clamps += other.clamps;
        self.errored += other.errored;
        self.skipped += other.skipped;
    }

    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
    }
}
