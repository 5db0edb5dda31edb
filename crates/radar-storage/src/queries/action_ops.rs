use chrono::{DateTime, Utc};
use radar_core::errors::StorageError;
use radar_core::models::{ActionType, EntityRef, TriggerAction};
use rusqlite::{params, Connection};

use super::enum_to_text;
use crate::{map_sqlite_err, to_storage_err};

pub fn insert_action(conn: &Connection, action: &TriggerAction) -> Result<(), StorageError> {
    let metadata_json =
        serde_json::to_string(&action.metadata).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO actions (id, person_id, org_id, action_type, priority,
                              triggering_score, triggering_tier, reason, metadata, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            action.id,
            action.entity.person_id,
            action.entity.org_id,
            enum_to_text(&action.action_type)?,
            enum_to_text(&action.priority)?,
            action.triggering_score,
            enum_to_text(&action.triggering_tier)?,
            action.reason,
            metadata_json,
            action.created_at.to_rfc3339(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

/// Dedup lookback: does an action of this type exist for the entity at or
/// after the cutoff?
pub fn recent_action_exists(
    conn: &Connection,
    entity: &EntityRef,
    action_type: ActionType,
    cutoff: DateTime<Utc>,
) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM actions
            WHERE person_id = ?1 AND org_id = ?2 AND action_type = ?3 AND created_at >= ?4
         )",
        params![
            entity.person_id,
            entity.org_id,
            enum_to_text(&action_type)?,
            cutoff.to_rfc3339(),
        ],
        |row| row.get(0),
    )
    .map_err(map_sqlite_err)
}
