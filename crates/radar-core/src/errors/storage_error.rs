/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("storage busy: {message}")]
    Busy { message: String },

    #[error("storage operation timed out: {operation}")]
    Timeout { operation: String },

    #[error("dedup store unavailable: {message}")]
    DedupUnavailable { message: String },
}

impl StorageError {
    /// Busy and timeout conditions are retried; everything else is not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StorageError::Busy { .. } | StorageError::Timeout { .. }
        )
    }
}
