pub mod config_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use storage_error::StorageError;

/// Top-level error type for the Radar engine.
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("entity {entity}: {reason}")]
    EntityProcessing { entity: String, reason: String },
}

impl RadarError {
    /// Whether this error is worth retrying at the per-entity level.
    pub fn is_transient(&self) -> bool {
        matches!(self, RadarError::Storage(e) if e.is_transient())
    }
}

pub type RadarResult<T> = Result<T, RadarError>;
