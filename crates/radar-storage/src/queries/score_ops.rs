use radar_core::errors::StorageError;
use radar_core::models::{EntityRef, Score};
use rusqlite::{params, Connection, OptionalExtension};

use super::{enum_from_text, enum_to_text, parse_timestamp};
use crate::map_sqlite_err;

pub fn get_score(conn: &Connection, entity: &EntityRef) -> Result<Option<Score>, StorageError> {
    conn.query_row(
        "SELECT raw_score, decayed_score, tier, signal_count, last_signal_at, computed_at, clamped
         FROM scores WHERE person_id = ?1 AND org_id = ?2",
        params![entity.person_id, entity.org_id],
        |row| {
            Ok((
                row.get::<_, f64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, bool>(6)?,
            ))
        },
    )
    .optional()
    .map_err(map_sqlite_err)?
    .map(
        |(raw_score, decayed_score, tier, signal_count, last_signal_at, computed_at, clamped)| {
            Ok(Score {
                entity: entity.clone(),
                raw_score,
                decayed_score,
                tier: enum_from_text(&tier)?,
                signal_count: signal_count as usize,
                last_signal_at: last_signal_at.as_deref().map(parse_timestamp).transpose()?,
                computed_at: parse_timestamp(&computed_at)?,
                clamped,
            })
        },
    )
    .transpose()
}

/// Upsert keyed by entity: the scores table is a materialized view over
/// the signal history, one live row per entity.
pub fn upsert_score(conn: &Connection, score: &Score) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO scores (person_id, org_id, raw_score, decayed_score, tier,
                             signal_count, last_signal_at, computed_at, clamped)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT (person_id, org_id) DO UPDATE SET
            raw_score = excluded.raw_score,
            decayed_score = excluded.decayed_score,
            tier = excluded.tier,
            signal_count = excluded.signal_count,
            last_signal_at = excluded.last_signal_at,
            computed_at = excluded.computed_at,
            clamped = excluded.clamped",
        params![
            score.entity.person_id,
            score.entity.org_id,
            score.raw_score,
            score.decayed_score,
            enum_to_text(&score.tier)?,
            score.signal_count as i64,
            score.last_signal_at.map(|t| t.to_rfc3339()),
            score.computed_at.to_rfc3339(),
            score.clamped as i32,
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}
