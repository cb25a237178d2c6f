//! Explicit snapshot cache for a loaded view.
//!
//! The owner decides when the snapshot is stale and calls
//! [`ViewCache::invalidate`]; nothing else clears it. The data layer never
//! sees this type.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Holds at most one snapshot of `T`.
#[derive(Debug)]
pub struct ViewCache<T> {
    slot: RwLock<Slot<T>>,
}

/// `generation` advances on every invalidation, so a load that started
/// before one can tell its result is already stale.
#[derive(Debug)]
struct Slot<T> {
    value: Option<Arc<T>>,
    generation: u64,
}

impl<T> Default for ViewCache<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(Slot {
                value: None,
                generation: 0,
            }),
        }
    }
}

impl<T> ViewCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, if one is held.
    pub async fn get(&self) -> Option<Arc<T>> {
        self.slot.read().await.value.clone()
    }

    /// Replace the snapshot and return a handle to it.
    pub async fn store(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.slot.write().await.value = Some(Arc::clone(&value));
        value
    }

    /// Drop the snapshot. Returns `true` if one was held.
    ///
    /// Loads already in flight will not store their result.
    pub async fn invalidate(&self) -> bool {
        let mut slot = self.slot.write().await;
        slot.generation = slot.generation.wrapping_add(1);
        slot.value.take().is_some()
    }

    /// Return the snapshot, loading and storing it first if the cache is cold.
    ///
    /// A failed load leaves the cache empty. If the cache was invalidated
    /// while `load` ran, the result goes to this caller only and the cache
    /// stays cold.
    pub async fn get_or_try_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started_at = {
            let slot = self.slot.read().await;
            if let Some(hit) = &slot.value {
                return Ok(Arc::clone(hit));
            }
            slot.generation
        };

        let fresh = Arc::new(load().await?);

        let mut slot = self.slot.write().await;
        if slot.generation == started_at {
            slot.value = Some(Arc::clone(&fresh));
        }
        Ok(fresh)
    }
}
