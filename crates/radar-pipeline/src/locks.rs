use std::sync::Arc;

use dashmap::DashMap;
use radar_core::models::EntityRef;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-entity mutual exclusion.
///
/// The safety cap and the trigger dedup check both read prior state for
/// an entity before writing new state; that read-then-write must not
/// interleave with a concurrent write for the same entity. One mutex per
/// entity is sufficient — no cross-entity locking is needed or taken.
#[derive(Default)]
pub struct EntityLocks {
    locks: DashMap<EntityRef, Arc<Mutex<()>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one entity, creating it on first use.
    pub async fn acquire(&self, entity: &EntityRef) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(entity.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
