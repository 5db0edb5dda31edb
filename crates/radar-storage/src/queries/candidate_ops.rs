use chrono::{DateTime, Utc};
use radar_core::errors::StorageError;
use radar_core::models::{Candidate, EntityContext, EntityRef, EntityState};
use rusqlite::{params, Connection};

use crate::map_sqlite_err;

/// Entities with activity at or after the cutoff, most recent first.
pub fn get_candidates(
    conn: &Connection,
    cutoff: DateTime<Utc>,
    limit: usize,
) -> Result<Vec<Candidate>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT person_id, org_id, full_name, email, company_name,
                    employer, title, seniority, department, location, employment_status
             FROM entities
             WHERE last_activity_at >= ?1
             ORDER BY last_activity_at DESC
             LIMIT ?2",
        )
        .map_err(map_sqlite_err)?;

    let rows = stmt
        .query_map(params![cutoff.to_rfc3339(), limit as i64], |row| {
            Ok(Candidate {
                entity: EntityRef {
                    person_id: row.get(0)?,
                    org_id: row.get(1)?,
                },
                context: EntityContext {
                    full_name: row.get(2)?,
                    email: row.get(3)?,
                    company_name: row.get(4)?,
                },
                state: EntityState {
                    employer: row.get(5)?,
                    title: row.get(6)?,
                    seniority: row.get(7)?,
                    department: row.get(8)?,
                    location: row.get(9)?,
                    employment_status: row.get(10)?,
                },
            })
        })
        .map_err(map_sqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_err)?;

    Ok(rows)
}

/// Importer-side upsert. The engine itself never creates entities; this
/// exists for ingestion tooling and tests.
pub fn upsert_entity(
    conn: &Connection,
    candidate: &Candidate,
    last_activity_at: DateTime<Utc>,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO entities (person_id, org_id, full_name, email, company_name,
                               employer, title, seniority, department, location,
                               employment_status, last_activity_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT (person_id, org_id) DO UPDATE SET
            full_name = excluded.full_name,
            email = excluded.email,
            company_name = excluded.company_name,
            employer = excluded.employer,
            title = excluded.title,
            seniority = excluded.seniority,
            department = excluded.department,
            location = excluded.location,
            employment_status = excluded.employment_status,
            last_activity_at = excluded.last_activity_at",
        params![
            candidate.entity.person_id,
            candidate.entity.org_id,
            candidate.context.full_name,
            candidate.context.email,
            candidate.context.company_name,
            candidate.state.employer,
            candidate.state.title,
            candidate.state.seniority,
            candidate.state.department,
            candidate.state.location,
            candidate.state.employment_status,
            last_activity_at.to_rfc3339(),
        ],
    )
    .map_err(map_sqlite_err)?;
    Ok(())
}
