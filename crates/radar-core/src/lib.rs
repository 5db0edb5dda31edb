//! # radar-core
//!
//! Foundation crate for the Radar signal-to-intent engine.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RadarConfig;
pub use errors::{RadarError, RadarResult};
pub use models::{
    ActionType, Candidate, ChangeSet, Confidence, ConfidenceTier, EntityRef, EntityState,
    Movement, MovementType, Priority, Score, ScoreTier, Signal, SignalType, Snapshot, StateField,
    TriggerAction,
};
