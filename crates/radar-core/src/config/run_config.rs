use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;
use crate::errors::ConfigError;

/// Batch/worker-pool configuration. Everything here is an ambient knob
/// with a sensible default; scoring semantics never live in this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Candidate lookback window in hours.
    pub lookback_hours: u64,
    /// Maximum entities processed per run.
    pub batch_size: usize,
    /// Worker-pool parallelism limit.
    pub parallelism: usize,
    /// Bounded retries for transient storage errors, per entity.
    pub max_retries: u32,
    /// Timeout for a single storage operation.
    pub storage_timeout_secs: u64,
    /// Timeout for a single entity's full pipeline.
    pub entity_timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lookback_hours: defaults::lookback_hours(),
            batch_size: defaults::batch_size(),
            parallelism: defaults::parallelism(),
            max_retries: defaults::max_retries(),
            storage_timeout_secs: defaults::storage_timeout_secs(),
            entity_timeout_secs: defaults::entity_timeout_secs(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallelism == 0 || self.parallelism > constants::MAX_PARALLELISM {
            return Err(ConfigError::InvalidRunSetting {
                key: "run.parallelism".to_string(),
                reason: format!("must be in 1..={}", constants::MAX_PARALLELISM),
            });
        }
        if self.batch_size == 0 || self.batch_size > constants::MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidRunSetting {
                key: "run.batch_size".to_string(),
                reason: format!("must be in 1..={}", constants::MAX_BATCH_SIZE),
            });
        }
        if self.lookback_hours == 0 {
            return Err(ConfigError::InvalidRunSetting {
                key: "run.lookback_hours".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
