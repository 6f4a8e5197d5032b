//! Per-product write serialization.
//!
//! The aggregator's read → mutate → save sequence is not transactional at
//! the store, so two concurrent writers against the same product could each
//! read a stale review list and overwrite the other's append. Every
//! mutating operation takes the product's slot in this arena for the whole
//! sequence; writers to different products do not contend.

use mercata_model::ProductId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct IdLockArena {
    slots: StdMutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl IdLockArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the slot for `id`, creating it on first use. Slots whose
    /// only owner is the map itself are pruned here, so the arena stays
    /// proportional to the set of products with writes in flight.
    pub async fn acquire(&self, id: &ProductId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(id.clone()).or_default())
        };
        slot.lock_owned().await
    }

    #[must_use]
    pub fn live_slots(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
