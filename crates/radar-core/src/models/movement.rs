use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::{Confidence, ConfidenceTier};
use super::entity::{EntityRef, EntityState};
use super::signal::SignalType;

/// Closed enumeration of classifiable state transitions.
/// An unclassifiable change is represented by the classifier returning
/// `None`, not by an enum variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Hire,
    Exit,
    Promotion,
    Transfer,
}

impl MovementType {
    pub const ALL: [MovementType; 4] = [
        MovementType::Hire,
        MovementType::Exit,
        MovementType::Promotion,
        MovementType::Transfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Hire => "hire",
            MovementType::Exit => "exit",
            MovementType::Promotion => "promotion",
            MovementType::Transfer => "transfer",
        }
    }

    /// The signal type emitted when this movement is detected.
    pub fn signal_type(self) -> SignalType {
        match self {
            MovementType::Hire => SignalType::MovementHire,
            MovementType::Exit => SignalType::MovementExit,
            MovementType::Promotion => SignalType::MovementPromotion,
            MovementType::Transfer => SignalType::MovementTransfer,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified state transition. Immutable once written: never updated
/// or deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    /// UUID v4 identifier.
    pub id: String,
    pub entity: EntityRef,
    pub movement_type: MovementType,
    pub confidence: Confidence,
    pub confidence_tier: ConfidenceTier,
    /// IDs of the rules that fired, for auditability.
    pub matched_rules: Vec<String>,
    /// State before the transition. None on transitions detected against
    /// a partially-populated history.
    pub old_state: Option<EntityState>,
    pub new_state: EntityState,
    pub detected_at: DateTime<Utc>,
}
