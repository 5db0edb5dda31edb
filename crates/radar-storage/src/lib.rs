//! # radar-storage
//!
//! SQLite implementation of the engine's storage contract. Owns the
//! connection, applies pragmas and migrations at open, and routes each
//! trait operation to a per-table query module.

pub mod engine;
pub mod migrations;
pub mod pragmas;
pub mod queries;

pub use engine::StorageEngine;

use radar_core::errors::StorageError;

/// Map a rusqlite error onto the storage taxonomy. Busy/locked become
/// transient errors the pipeline may retry.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(code, ref message) = e {
        use rusqlite::ErrorCode;
        if matches!(code.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) {
            return StorageError::Busy {
                message: message.clone().unwrap_or_else(|| e.to_string()),
            };
        }
    }
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Shorthand for non-rusqlite failures inside storage code.
pub(crate) fn to_storage_err(message: impl Into<String>) -> StorageError {
    StorageError::SqliteError {
        message: message.into(),
    }
}
