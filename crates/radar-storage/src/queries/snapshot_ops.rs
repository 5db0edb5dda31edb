use radar_core::errors::StorageError;
use radar_core::models::{EntityRef, Snapshot};
use rusqlite::{params, Connection, OptionalExtension};

use super::parse_timestamp;
use crate::{map_sqlite_err, to_storage_err};

pub fn get_snapshot(
    conn: &Connection,
    entity: &EntityRef,
) -> Result<Option<Snapshot>, StorageError> {
    conn.query_row(
        "SELECT state, content_hash, observed_at FROM snapshots
         WHERE person_id = ?1 AND org_id = ?2",
        params![entity.person_id, entity.org_id],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    )
    .optional()
    .map_err(map_sqlite_err)?
    .map(|(state_json, content_hash, observed_at)| {
        Ok(Snapshot {
            entity: entity.clone(),
            state: serde_json::from_str(&state_json)
                .map_err(|e| to_storage_err(e.to_string()))?,
            content_hash,
            observed_at: parse_timestamp(&observed_at)?,
        })
    })
    .transpose()
}

/// Upsert: exactly one snapshot row per entity.
pub fn put_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<(), StorageError> {
    let state_json =
        serde_json::to_string(&snapshot.state).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO snapshots (person_id, org_id, state, content_hash, observed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (person_id, org_id) DO UPDATE SET
            state = excluded.state,
            content_hash = excluded.content_hash,
            observed_at = excluded.observed_at",
        params![
            snapshot.entity.person_id,
            snapshot.entity.org_id,
            state_json,
            snapshot.content_hash,
            snapshot.observed_at.to_rfc3339(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}
