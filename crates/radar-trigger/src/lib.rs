//! # radar-trigger
//!
//! Trigger evaluation: maps score tiers to actions through the configured
//! threshold table, suppresses duplicates within the lookback window
//! (failing closed when the dedup store is unreachable), and gates
//! meeting requests behind an eligibility check.

pub mod evaluator;

pub use evaluator::{EvaluationOutcome, TriggerEvaluator, TriggerState};
