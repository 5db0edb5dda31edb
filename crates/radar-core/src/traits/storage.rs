use crate::errors::RadarResult;
use crate::models::{
    ActionType, Candidate, EntityRef, Movement, Score, Signal, Snapshot, TriggerAction,
};

/// The engine's storage contract: candidates + snapshots + signals +
/// scores + actions + movements. Any persistent relational or document
/// store satisfies this; the workspace ships a SQLite implementation.
pub trait IIntentStorage: Send + Sync {
    // --- Candidates ---
    /// Entities with activity inside the lookback window, bounded by `limit`.
    fn get_candidates(&self, lookback_hours: u64, limit: usize) -> RadarResult<Vec<Candidate>>;

    // --- Snapshots ---
    fn get_snapshot(&self, entity: &EntityRef) -> RadarResult<Option<Snapshot>>;
    /// Upsert: exactly one snapshot per entity, overwritten every pass.
    fn put_snapshot(&self, snapshot: &Snapshot) -> RadarResult<()>;

    // --- Signals ---
    /// All signals for an entity; `include_scored=false` restricts to
    /// signals not yet incorporated into a score.
    fn get_signals(&self, entity: &EntityRef, include_scored: bool) -> RadarResult<Vec<Signal>>;
    fn insert_signal(&self, signal: &Signal) -> RadarResult<()>;
    /// Flip scored→true for the given signal ids.
    fn mark_scored(&self, signal_ids: &[String]) -> RadarResult<()>;

    // --- Scores ---
    fn get_score(&self, entity: &EntityRef) -> RadarResult<Option<Score>>;
    /// Upsert keyed by entity: at most one live score row per entity.
    fn upsert_score(&self, score: &Score) -> RadarResult<()>;

    // --- Actions ---
    /// Was an action of this type fired for this entity within the window?
    fn get_recent_action(
        &self,
        entity: &EntityRef,
        action_type: ActionType,
        window_hours: u64,
    ) -> RadarResult<bool>;
    fn insert_action(&self, action: &TriggerAction) -> RadarResult<()>;

    // --- Movements ---
    fn insert_movement(&self, movement: &Movement) -> RadarResult<()>;
}
