//! Default values for ambient (non-critical) configuration knobs.
//! Scoring-critical tables — weights, decay bands, tier boundaries,
//! trigger thresholds — have NO defaults: missing keys fail at load.

pub const DEFAULT_LOOKBACK_HOURS: u64 = 24;
pub const DEFAULT_BATCH_SIZE: usize = 500;
pub const DEFAULT_PARALLELISM: usize = 8;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ENTITY_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SOURCE_MODIFIER: f64 = 1.0;
pub const DEFAULT_SAFETY_CAP_WINDOW_HOURS: u64 = 24;

pub(crate) fn lookback_hours() -> u64 {
    DEFAULT_LOOKBACK_HOURS
}

pub(crate) fn batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

pub(crate) fn parallelism() -> usize {
    DEFAULT_PARALLELISM
}

pub(crate) fn max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

pub(crate) fn storage_timeout_secs() -> u64 {
    DEFAULT_STORAGE_TIMEOUT_SECS
}

pub(crate) fn entity_timeout_secs() -> u64 {
    DEFAULT_ENTITY_TIMEOUT_SECS
}

pub(crate) fn source_modifier() -> f64 {
    DEFAULT_SOURCE_MODIFIER
}

pub(crate) fn safety_cap_window_hours() -> u64 {
    DEFAULT_SAFETY_CAP_WINDOW_HOURS
}
