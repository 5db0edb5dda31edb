use radar_core::errors::StorageError;
use radar_core::models::Movement;
use rusqlite::{params, Connection};

use super::enum_to_text;
use crate::{map_sqlite_err, to_storage_err};

/// Movements are immutable once written: insert-only, no update path.
pub fn insert_movement(conn: &Connection, movement: &Movement) -> Result<(), StorageError> {
    let matched_rules_json = serde_json::to_string(&movement.matched_rules)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let old_state_json = movement
        .old_state
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let new_state_json =
        serde_json::to_string(&movement.new_state).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO movements (id, person_id, org_id, movement_type, confidence,
                                confidence_tier, matched_rules, old_state, new_state, detected_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            movement.id,
            movement.entity.person_id,
            movement.entity.org_id,
            enum_to_text(&movement.movement_type)?,
            movement.confidence.value(),
            enum_to_text(&movement.confidence_tier)?,
            matched_rules_json,
            old_state_json,
            new_state_json,
            movement.detected_at.to_rfc3339(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}
