//! Per-table query modules plus shared column-encoding helpers.
//!
//! Enums are stored as their snake_case serde names; timestamps as
//! RFC 3339 text, which sorts correctly as a string.

pub mod action_ops;
pub mod candidate_ops;
pub mod movement_ops;
pub mod score_ops;
pub mod signal_ops;
pub mod snapshot_ops;

use chrono::{DateTime, Utc};
use radar_core::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::to_storage_err;

pub(crate) fn enum_to_text<T: Serialize>(value: &T) -> Result<String, StorageError> {
    let json = serde_json::to_string(value).map_err(|e| to_storage_err(e.to_string()))?;
    Ok(json.trim_matches('"').to_string())
}

pub(crate) fn enum_from_text<T: DeserializeOwned>(text: &str) -> Result<T, StorageError> {
    serde_json::from_str(&format!("\"{text}\""))
        .map_err(|e| to_storage_err(format!("unknown enum value '{text}': {e}")))
}

pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp '{text}': {e}")))
}
