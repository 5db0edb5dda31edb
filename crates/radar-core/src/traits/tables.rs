use crate::config::ScoringConfig;
use crate::models::SignalType;

/// Lookup tables the score calculator is parameterized over: base weights,
/// the decay curve, and per-source confidence modifiers. Implemented by
/// the validated configuration; tests substitute their own.
pub trait IScoringTables: Send + Sync {
    /// Configured base weight for a signal type.
    fn weight(&self, signal_type: SignalType) -> f64;

    /// Decay factor for a signal of the given age. Monotonically
    /// non-increasing in age; floors at a strictly positive minimum.
    fn decay_factor(&self, age_days: u64) -> f64;

    /// Confidence modifier for a producing source (default for unknown).
    fn source_modifier(&self, source: &str) -> f64;
}

impl IScoringTables for ScoringConfig {
    fn weight(&self, signal_type: SignalType) -> f64 {
        // Validation guarantees every signal type has an entry.
        self.weights.get(&signal_type).copied().unwrap_or(0.0)
    }

    fn decay_factor(&self, age_days: u64) -> f64 {
        for band in &self.decay_bands {
            if age_days <= band.max_age_days {
                return band.factor;
            }
        }
        self.decay_floor
    }

    fn source_modifier(&self, source: &str) -> f64 {
        self.source_modifiers
            .get(source)
            .copied()
            .unwrap_or(self.default_source_modifier)
    }
}
