use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::EntityRef;

/// Closed enumeration of signal categories. Weights are resolved through
/// the configured weight table, never embedded in the signal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    MovementHire,
    MovementExit,
    MovementPromotion,
    MovementTransfer,
    ProfileView,
    EmailOpen,
    EmailClick,
    WebsiteVisit,
    ContentDownload,
}

impl SignalType {
    pub const ALL: [SignalType; 9] = [
        SignalType::MovementHire,
        SignalType::MovementExit,
        SignalType::MovementPromotion,
        SignalType::MovementTransfer,
        SignalType::ProfileView,
        SignalType::EmailOpen,
        SignalType::EmailClick,
        SignalType::WebsiteVisit,
        SignalType::ContentDownload,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::MovementHire => "movement_hire",
            SignalType::MovementExit => "movement_exit",
            SignalType::MovementPromotion => "movement_promotion",
            SignalType::MovementTransfer => "movement_transfer",
            SignalType::ProfileView => "profile_view",
            SignalType::EmailOpen => "email_open",
            SignalType::EmailClick => "email_click",
            SignalType::WebsiteVisit => "website_visit",
            SignalType::ContentDownload => "content_download",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, weighted, timestamped event tied to an entity. Created by any
/// upstream producer (including the movement classifier). Mutated only to
/// flip `scored` once incorporated into a score. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// UUID v4 identifier.
    pub id: String,
    pub entity: EntityRef,
    pub signal_type: SignalType,
    /// Producing source, e.g. "linkedin", "crm", "web". Open-ended: unknown
    /// sources fall back to the default confidence modifier.
    pub source: String,
    pub detected_at: DateTime<Utc>,
    pub scored: bool,
}

impl Signal {
    pub fn new(
        entity: EntityRef,
        signal_type: SignalType,
        source: impl Into<String>,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            entity,
            signal_type,
            source: source.into(),
            detected_at,
            scored: false,
        }
    }

    /// Whole days elapsed since detection, floored at zero for
    /// clock-skewed future timestamps.
    pub fn age_days(&self, now: DateTime<Utc>) -> u64 {
        (now - self.detected_at)
            .num_seconds()
            .max(0) as u64
            / crate::constants::SECONDS_PER_DAY as u64
    }
}
