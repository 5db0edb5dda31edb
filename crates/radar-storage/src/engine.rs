//! [`StorageEngine`] — owns the SQLite connection, applies pragmas and
//! migrations at open, implements the storage contract.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use radar_core::errors::{RadarResult, StorageError};
use radar_core::models::{
    ActionType, Candidate, EntityRef, Movement, Score, Signal, Snapshot, TriggerAction,
};
use radar_core::traits::IIntentStorage;

use crate::queries;
use crate::{map_sqlite_err, migrations, pragmas, to_storage_err};

/// SQLite-backed storage. A single serialized connection: per-entity
/// writes are already independent units, and WAL plus a bounded busy
/// timeout keeps contention a retryable condition.
pub struct StorageEngine {
    conn: Mutex<Connection>,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> RadarResult<Self> {
        let conn = Connection::open(path).map_err(map_sqlite_err)?;
        Self::initialize(conn)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> RadarResult<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> RadarResult<Self> {
        pragmas::apply(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> RadarResult<T>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned"))?;
        f(&conn).map_err(Into::into)
    }

    /// Importer-side entity upsert; the engine proper only reads entities.
    pub fn upsert_entity(
        &self,
        candidate: &Candidate,
        last_activity_at: DateTime<Utc>,
    ) -> RadarResult<()> {
        self.with_conn(|conn| queries::candidate_ops::upsert_entity(conn, candidate, last_activity_at))
    }
}

impl IIntentStorage for StorageEngine {
    fn get_candidates(&self, lookback_hours: u64, limit: usize) -> RadarResult<Vec<Candidate>> {
        let cutoff = Utc::now() - Duration::hours(lookback_hours as i64);
        self.with_conn(|conn| queries::candidate_ops::get_candidates(conn, cutoff, limit))
    }

    fn get_snapshot(&self, entity: &EntityRef) -> RadarResult<Option<Snapshot>> {
        self.with_conn(|conn| queries::snapshot_ops::get_snapshot(conn, entity))
    }

    fn put_snapshot(&self, snapshot: &Snapshot) -> RadarResult<()> {
        self.with_conn(|conn| queries::snapshot_ops::put_snapshot(conn, snapshot))
    }

    fn get_signals(&self, entity: &EntityRef, include_scored: bool) -> RadarResult<Vec<Signal>> {
        self.with_conn(|conn| queries::signal_ops::get_signals(conn, entity, include_scored))
    }

    fn insert_signal(&self, signal: &Signal) -> RadarResult<()> {
        self.with_conn(|conn| queries::signal_ops::insert_signal(conn, signal))
    }

    fn mark_scored(&self, signal_ids: &[String]) -> RadarResult<()> {
        self.with_conn(|conn| queries::signal_ops::mark_scored(conn, signal_ids))
    }

    fn get_score(&self, entity: &EntityRef) -> RadarResult<Option<Score>> {
        self.with_conn(|conn| queries::score_ops::get_score(conn, entity))
    }

    fn upsert_score(&self, score: &Score) -> RadarResult<()> {
        self.with_conn(|conn| queries::score_ops::upsert_score(conn, score))
    }

    fn get_recent_action(
        &self,
        entity: &EntityRef,
        action_type: ActionType,
        window_hours: u64,
    ) -> RadarResult<bool> {
        let cutoff = Utc::now() - Duration::hours(window_hours as i64);
        self.with_conn(|conn| {
            queries::action_ops::recent_action_exists(conn, entity, action_type, cutoff)
        })
    }

    fn insert_action(&self, action: &TriggerAction) -> RadarResult<()> {
        self.with_conn(|conn| queries::action_ops::insert_action(conn, action))
    }

    fn insert_movement(&self, movement: &Movement) -> RadarResult<()> {
        self.with_conn(|conn| queries::movement_ops::insert_movement(conn, movement))
    }
}
