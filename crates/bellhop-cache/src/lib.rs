//! Process-wide TTL caching for search responses and credentials.
//!
//! One [`TtlCache`] instance per resource class is shared (via `Arc`) across
//! the process — there is no per-request isolation. Expiry is enforced twice:
//! lazily on every `get` (a read never returns a value past its deadline, as
//! part of the contract) and proactively by [`spawn_sweeper`] so entries that
//! are never re-read still get evicted.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

pub mod key;
pub mod singleflight;

pub use key::search_cache_key;
pub use singleflight::SingleFlight;

/// TTL policy per resource class.
///
/// Search results go stale quickly as availability shifts; static hotel
/// detail can live much longer; tokens are cached for the provider lifetime
/// minus a safety buffer.
pub const SEARCH_TTL: Duration = Duration::from_secs(10 * 60);
pub const DETAIL_TTL: Duration = Duration::from_secs(60 * 60);
pub const TOKEN_TTL: Duration = Duration::from_secs(50 * 60);

struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// A thread-safe map of string keys to values with per-entry expiry.
///
/// Entries are replaced wholesale on insert, never patched in place.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached value, or `None` on miss or expiry.
    ///
    /// An expired entry is deleted on access rather than returned stale.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        let expired = {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.data.clone());
                }
                Some(_) => true,
            }
        };
        if expired {
            self.remove_if_expired(key);
        }
        None
    }

    /// Deletes the entry only if it is still expired once the write lock is
    /// held. A writer that replaced the entry between the expiry check and
    /// this call keeps its fresh value.
    fn remove_if_expired(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
        }
    }

    pub fn insert(&self, key: &str, data: T, ttl: Duration) {
        let entry = CacheEntry {
            data,
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_owned(), entry);
    }

    pub fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Number of entries currently held, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every expired entry and returns how many were evicted.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns a background task that purges expired entries every `interval`
/// (≈5 minutes in production) to bound memory for keys that are never
/// re-read. The task runs until the returned handle is aborted or the
/// runtime shuts down.
pub fn spawn_sweeper<T>(
    cache: std::sync::Arc<TtlCache<T>>,
    interval: Duration,
) -> tokio::task::JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so the sweep cadence
        // starts one interval after spawn.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = cache.purge_expired();
            if evicted > 0 {
                tracing::debug!(evicted, remaining = cache.len(), "cache sweep");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn get_after_insert_returns_value() {
        let cache = TtlCache::new();
        cache.insert("k", 42u32, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(42));
    }

    #[test]
    fn get_after_ttl_elapsed_returns_none_and_evicts() {
        let cache = TtlCache::new();
        cache.insert("k", 42u32, Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get("k"), None);
        // Lazy deletion must have removed the entry, not just hidden it.
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn remove_invalidates_immediately_regardless_of_ttl() {
        let cache = TtlCache::new();
        cache.insert("k", 42u32, Duration::from_secs(3600));
        cache.remove("k");
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn lazy_eviction_spares_a_freshly_replaced_entry() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32, Duration::ZERO);
        // A writer replaces the expired entry before cleanup gets the write
        // lock; cleanup must not delete the fresh value.
        cache.insert("k", 2u32, Duration::from_secs(60));
        cache.remove_if_expired("k");
        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn lazy_eviction_removes_a_still_expired_entry() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32, Duration::ZERO);
        cache.remove_if_expired("k");
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_replaces_existing_entry_wholesale() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32, Duration::from_secs(60));
        cache.insert("k", 2u32, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let cache = TtlCache::new();
        cache.insert("a", 1u32, Duration::from_secs(60));
        cache.insert("b", 2u32, Duration::from_secs(60));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_expired_only_removes_expired_entries() {
        let cache = TtlCache::new();
        cache.insert("stale", 1u32, Duration::from_millis(5));
        cache.insert("fresh", 2u32, Duration::from_secs(60));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.get("fresh"), Some(2));
    }

    #[test]
    fn ttl_policy_orders_resource_classes() {
        assert!(SEARCH_TTL < TOKEN_TTL);
        assert!(TOKEN_TTL < DETAIL_TTL);
    }

    #[tokio::test]
    async fn sweeper_evicts_entries_that_are_never_read() {
        let cache = Arc::new(TtlCache::new());
        cache.insert("k", 1u32, Duration::from_millis(20));
        let handle = spawn_sweeper(Arc::clone(&cache), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(cache.len(), 0, "sweeper should evict without any get()");
        handle.abort();
    }
}
