pub mod action;
pub mod confidence;
pub mod contradiction;
pub mod entity;
pub mod movement;
pub mod run_report;
pub mod score;
pub mod signal;
pub mod snapshot;

pub use action::{ActionType, Priority, TriggerAction};
pub use confidence::{Confidence, ConfidenceTier};
pub use contradiction::Contradiction;
pub use entity::{Candidate, EntityContext, EntityRef, EntityState, StateField};
pub use movement::{Movement, MovementType};
pub use run_report::RunReport;
pub use score::{Score, ScoreTier};
pub use signal::{Signal, SignalType};
pub use snapshot::{ChangeSet, FieldChange, Snapshot};
