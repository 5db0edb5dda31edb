use radar_core::errors::StorageError;
use rusqlite::Connection;

use crate::map_sqlite_err;

/// Startup pragmas: WAL for concurrent readers, bounded busy wait so
/// contention surfaces as a retryable error instead of hanging.
pub fn apply(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(map_sqlite_err)
}
