/// Radar engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of candidates fetched per run regardless of config.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Upper bound on configured worker-pool parallelism.
pub const MAX_PARALLELISM: usize = 64;

/// Seconds in a day, used for signal age bucketing.
pub const SECONDS_PER_DAY: i64 = 86_400;
