use radar_core::errors::StorageError;
use radar_core::models::{EntityRef, Signal};
use rusqlite::{params, Connection};

use super::{enum_from_text, enum_to_text, parse_timestamp};
use crate::map_sqlite_err;

pub fn insert_signal(conn: &Connection, signal: &Signal) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO signals (id, person_id, org_id, signal_type, source, detected_at, scored)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            signal.id,
            signal.entity.person_id,
            signal.entity.org_id,
            enum_to_text(&signal.signal_type)?,
            signal.source,
            signal.detected_at.to_rfc3339(),
            signal.scored as i32,
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}

pub fn get_signals(
    conn: &Connection,
    entity: &EntityRef,
    include_scored: bool,
) -> Result<Vec<Signal>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, signal_type, source, detected_at, scored FROM signals
             WHERE person_id = ?1 AND org_id = ?2 AND (?3 OR scored = 0)
             ORDER BY detected_at ASC",
        )
        .map_err(map_sqlite_err)?;

    let rows = stmt
        .query_map(
            params![entity.person_id, entity.org_id, include_scored],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                ))
            },
        )
        .map_err(map_sqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_err)?;

    rows.into_iter()
        .map(|(id, signal_type, source, detected_at, scored)| {
            Ok(Signal {
                id,
                entity: entity.clone(),
                signal_type: enum_from_text(&signal_type)?,
                source,
                detected_at: parse_timestamp(&detected_at)?,
                scored,
            })
        })
        .collect()
}

/// Flip scored→true for the given ids.
pub fn mark_scored(conn: &Connection, signal_ids: &[String]) -> Result<(), StorageError> {
    if signal_ids.is_empty() {
        return Ok(());
    }
    let placeholders = vec!["?"; signal_ids.len()].join(", ");
    let sql = format!("UPDATE signals SET scored = 1 WHERE id IN ({placeholders})");
    conn.execute(&sql, rusqlite::params_from_iter(signal_ids.iter()))
        .map_err(map_sqlite_err)?;
    Ok(())
}
