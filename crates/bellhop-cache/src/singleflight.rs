//! Per-key de-duplication of concurrent identical fetches.
//!
//! Without this, two concurrent searches for the same key both miss the
//! cache and both hit the upstream. [`SingleFlight`] hands out one async
//! mutex per key: the first caller holds the lock while it fetches and
//! writes the cache; followers block on [`SingleFlight::acquire`] and then
//! re-check the cache, turning the duplicate upstream call into a hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

#[derive(Default)]
pub struct SingleFlight {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl SingleFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`. Callers must re-check the cache
    /// after the guard is granted — a predecessor may have populated it.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(
                locks
                    .entry(key.to_owned())
                    .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Drops key locks nobody is holding or waiting on. Called after a
    /// completed fetch so the map stays proportional to in-flight work.
    pub fn prune_idle(&self) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
