//! Versioned schema migrations tracked via `PRAGMA user_version`.

pub mod v001_initial;

use radar_core::errors::StorageError;
use rusqlite::Connection;

use crate::map_sqlite_err;

type Migration = (u32, fn(&Connection) -> Result<(), StorageError>);

const MIGRATIONS: &[Migration] = &[(1, v001_initial::apply)];

/// Apply all migrations newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(map_sqlite_err)?;

    for (version, apply) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        apply(conn).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        tracing::info!(version, "applied schema migration");
    }
    Ok(())
}
