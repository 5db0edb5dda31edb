use radar_core::errors::StorageError;
use rusqlite::Connection;

use crate::map_sqlite_err;

/// Initial schema: entities (read-only for the engine, written by
/// importers), snapshots, signals, movements, scores, actions.
pub fn apply(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS entities (
            person_id TEXT NOT NULL,
            org_id TEXT NOT NULL,
            full_name TEXT,
            email TEXT,
            company_name TEXT,
            employer TEXT,
            title TEXT,
            seniority TEXT,
            department TEXT,
            location TEXT,
            employment_status TEXT,
            last_activity_at TEXT NOT NULL,
            PRIMARY KEY (person_id, org_id)
        );

        CREATE TABLE IF NOT EXISTS snapshots (
            person_id TEXT NOT NULL,
            org_id TEXT NOT NULL,
            state TEXT NOT NULL,
            content_hash TEXT NOT NULL,
            observed_at TEXT NOT NULL,
            PRIMARY KEY (person_id, org_id)
        );

        CREATE TABLE IF NOT EXISTS signals (
            id TEXT PRIMARY KEY,
            person_id TEXT NOT NULL,
            org_id TEXT NOT NULL,
            signal_type TEXT NOT NULL,
            source TEXT NOT NULL,
            detected_at TEXT NOT NULL,
            scored INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_signals_entity
            ON signals (person_id, org_id, scored);

        CREATE TABLE IF NOT EXISTS movements (
            id TEXT PRIMARY KEY,
            person_id TEXT NOT NULL,
            org_id TEXT NOT NULL,
            movement_type TEXT NOT NULL,
            confidence REAL NOT NULL,
            confidence_tier TEXT NOT NULL,
            matched_rules TEXT NOT NULL,
            old_state TEXT,
            new_state TEXT NOT NULL,
            detected_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_movements_entity
            ON movements (person_id, org_id, detected_at);

        CREATE TABLE IF NOT EXISTS scores (
            person_id TEXT NOT NULL,
            org_id TEXT NOT NULL,
            raw_score REAL NOT NULL,
            decayed_score REAL NOT NULL,
            tier TEXT NOT NULL,
            signal_count INTEGER NOT NULL,
            last_signal_at TEXT,
            computed_at TEXT NOT NULL,
            clamped INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (person_id, org_id)
        );

        CREATE TABLE IF NOT EXISTS actions (
            id TEXT PRIMARY KEY,
            person_id TEXT NOT NULL,
            org_id TEXT NOT NULL,
            action_type TEXT NOT NULL,
            priority TEXT NOT NULL,
            triggering_score REAL NOT NULL,
            triggering_tier TEXT NOT NULL,
            reason TEXT NOT NULL,
            metadata TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_actions_dedup
            ON actions (person_id, org_id, action_type, created_at);",
    )
    .map_err(map_sqlite_err)
}
