//! TTL Cache Module
//!
//! The public concurrent cache handle: a single reader/writer lock around
//! the core store plus the lifecycle of the background sweep task.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::cache::{CacheStore, Capacity};
use crate::config::CacheConfig;
use crate::tasks::{spawn_sweeper, SweeperHandle};

// == Shared State ==
/// State shared between cache handles and the sweeper task.
#[derive(Debug)]
pub(crate) struct Shared<K, V> {
    /// Core store behind the single reader/writer lock
    pub(crate) store: RwLock<CacheStore<K, V>>,
    /// Handle of the running sweeper, taken exactly once on close
    pub(crate) sweeper: Mutex<Option<SweeperHandle>>,
}

impl<K, V> Shared<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Runs one two-phase sweep: expired keys are collected under a read
    /// lock with "now" sampled once, then deleted under a write lock.
    ///
    /// Readers proceed during the scan; an entry that expires between the
    /// two phases is picked up by the next sweep.
    pub(crate) async fn sweep(&self) -> usize {
        let now = Instant::now();
        let keys = self.store.read().await.expired_keys(now);
        if keys.is_empty() {
            return 0;
        }
        self.store.write().await.remove_keys(&keys)
    }
}

// == TTL Cache ==
/// Concurrency-safe in-memory key-value cache with per-entry TTL expiration.
///
/// Cloning the handle shares the same cache. All reads take a shared lock,
/// all mutations an exclusive one, so any number of callers may operate on
/// the cache concurrently.
///
/// When a cleanup interval is configured, a background task sweeps expired
/// entries until [`close`](TtlCache::close) is called; dropping the last
/// handle also terminates it.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache from `config`.
    ///
    /// Starts at most one background sweeper task, and only when a non-zero
    /// cleanup interval is configured. Spawning the sweeper requires a
    /// running tokio runtime; a cache without a cleanup interval can be
    /// created anywhere.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = Capacity::from_limit(config.max_size);
        let shared = Arc::new(Shared {
            store: RwLock::new(CacheStore::new(config.default_ttl, capacity)),
            sweeper: Mutex::new(None),
        });

        if let Some(interval) = config.cleanup_interval.filter(|i| !i.is_zero()) {
            let handle = spawn_sweeper(Arc::downgrade(&shared), interval);
            *lock_sweeper(&shared.sweeper) = Some(handle);
        }

        Self { shared }
    }

    // == Get ==
    /// Looks up `key`, returning its value even if expired.
    ///
    /// Callers that rely on the background sweep for freshness skip the
    /// timestamp comparison this way; use [`get_safe`](TtlCache::get_safe)
    /// for strict expiration checking.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.shared.store.read().await.get(key)
    }

    /// Looks up `key`, treating an expired entry as absent.
    ///
    /// The stale entry is not removed; that is left to the sweep or a later
    /// write.
    pub async fn get_safe(&self, key: &K) -> Option<V> {
        self.shared.store.read().await.get_safe(key)
    }

    /// Looks up `key`, returning `V::default()` on a miss.
    pub async fn get_value(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).await.unwrap_or_default()
    }

    // == Set ==
    /// Inserts or replaces `key` with the configured default TTL.
    pub async fn set(&self, key: K, value: V) {
        self.shared.store.write().await.set(key, value);
    }

    /// Inserts or replaces `key` with an explicit TTL.
    ///
    /// A `None` or zero TTL means the entry never expires.
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Option<Duration>) {
        self.shared.store.write().await.set_with_ttl(key, value, ttl);
    }

    // == Set All ==
    /// Inserts or replaces every pair in `batch` with the default TTL.
    ///
    /// The batch is applied under a single write-lock acquisition, so no
    /// reader observes it partially applied.
    pub async fn set_all(&self, batch: HashMap<K, V>) {
        self.shared.store.write().await.set_all(batch);
    }

    /// Inserts or replaces every pair in `batch` with an explicit TTL shared
    /// by the whole batch, under a single write-lock acquisition.
    pub async fn set_all_with_ttl(&self, batch: HashMap<K, V>, ttl: Option<Duration>) {
        self.shared.store.write().await.set_all_with_ttl(batch, ttl);
    }

    // == Remove ==
    /// Deletes `key` if present; absent keys are a no-op.
    pub async fn remove(&self, key: &K) {
        self.shared.store.write().await.remove(key);
    }

    // == Clear ==
    /// Removes all entries.
    pub async fn clear(&self) {
        self.shared.store.write().await.clear();
    }

    // == Clean Expired ==
    /// Removes every entry that is stale as of the moment the sweep starts
    /// and returns how many were removed.
    ///
    /// This is what the background task runs on each tick; caches built
    /// without a cleanup interval can call it manually.
    pub async fn clean_expired(&self) -> usize {
        self.shared.sweep().await
    }

    // == Close ==
    /// Stops the background sweeper (if running) and empties the store.
    ///
    /// Safe to call more than once: the stop handle is taken out of its slot
    /// on the first call, so a second close finds nothing to signal. The
    /// cache remains usable afterwards as an empty store.
    pub async fn close(&self) {
        let sweeper = lock_sweeper(&self.shared.sweeper).take();
        if let Some(handle) = sweeper {
            handle.stop().await;
        }
        self.shared.store.write().await.clear();
    }

    // == Length ==
    /// Number of entries currently stored, including expired ones that have
    /// not been swept yet.
    pub async fn len(&self) -> usize {
        self.shared.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.shared.store.read().await.is_empty()
    }
}

/// Locks the sweeper slot, recovering the guard if a panicking thread
/// poisoned it.
fn lock_sweeper(
    slot: &Mutex<Option<SweeperHandle>>,
) -> std::sync::MutexGuard<'_, Option<SweeperHandle>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
