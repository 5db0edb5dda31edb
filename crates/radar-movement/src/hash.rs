use radar_core::models::{EntityState, StateField};

/// Canonical content hash over the configured hash-field subset.
///
/// The hash is a pure function of the named fields' values: identical
/// values always yield identical hashes, and fields outside `hash_fields`
/// (volatile or irrelevant ones) never influence the result.
///
/// Encoding is length-delimited per field so adjacent values can never
/// collide by concatenation ("ab","c" vs "a","bc").
pub fn state_hash(state: &EntityState, hash_fields: &[StateField]) -> String {
    let mut hasher = blake3::Hasher::new();
    for field in hash_fields {
        hasher.update(field.as_str().as_bytes());
        match state.field(*field) {
            Some(value) => {
                hasher.update(&(value.len() as u64).to_le_bytes());
                hasher.update(value.as_bytes());
            }
            // Absent is distinct from empty.
            None => {
                hasher.update(&u64::MAX.to_le_bytes());
            }
        }
    }
    hasher.finalize().to_hex().to_string()
}
