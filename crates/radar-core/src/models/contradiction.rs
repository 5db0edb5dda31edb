use serde::{Deserialize, Serialize};

use super::entity::StateField;

/// A detected contradiction between observed fields: two fields implying
/// mutually exclusive transitions (e.g. a "former" title alongside an
/// active employment status). Logged for manual review, never a hard
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contradiction {
    /// The configured rule that flagged this.
    pub rule_id: String,
    /// The conflicting field pair.
    pub fields: (StateField, StateField),
    /// Human-readable description of the conflict.
    pub description: String,
}
