use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{EntityRef, EntityState, StateField};

/// The last-observed state of an entity plus a content hash over the
/// configured hash fields. One snapshot per entity, overwritten on every
/// processing pass whether or not a change was detected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub entity: EntityRef,
    pub state: EntityState,
    pub content_hash: String,
    pub observed_at: DateTime<Utc>,
}

/// A single field difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: StateField,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FieldChange {
    /// Field went from absent to present.
    pub fn gained(&self) -> bool {
        self.old_value.is_none() && self.new_value.is_some()
    }

    /// Field went from present to absent.
    pub fn cleared(&self) -> bool {
        self.old_value.is_some() && self.new_value.is_none()
    }
}

/// Ephemeral diff between the stored snapshot and the newly observed state.
/// Computed per run, never persisted; only its derived movement record is.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub changes: Vec<FieldChange>,
    /// True iff the content hash differs from the stored one.
    pub is_different: bool,
    /// True on first observation: baseline the snapshot, classify nothing.
    pub first_seen: bool,
}

impl ChangeSet {
    /// Look up the change for a specific field, if any.
    pub fn change_for(&self, field: StateField) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }
}
