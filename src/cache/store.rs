//! Cache Store Module
//!
//! Core map engine combining HashMap storage with TTL expiration and the
//! capacity policy. The store itself is not synchronized; `TtlCache` wraps
//! it in a reader/writer lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::entry::expiration_from_ttl;
use crate::cache::{CacheEntry, Capacity};

// == Cache Store ==
/// Unordered key-value storage with per-entry expiration.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// TTL applied when a write does not carry an explicit one
    default_ttl: Option<Duration>,
    /// Write-path size policy
    capacity: Capacity,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// A bounded capacity pre-allocates the map for its limit.
    pub fn new(default_ttl: Option<Duration>, capacity: Capacity) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.store_hint()),
            default_ttl,
            capacity,
        }
    }

    // == Get ==
    /// Returns the value for `key` regardless of expiration.
    ///
    /// No side effects: a stale entry is returned as-is, not evicted.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Returns the value for `key` only if it has not expired.
    ///
    /// A stale entry is reported as absent but left in place for the sweep
    /// or a later write to remove.
    pub fn get_safe(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Inserts or replaces `key` using the default TTL.
    pub fn set(&mut self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Inserts or replaces `key` with an explicit TTL.
    ///
    /// Under a bounded policy, inserting a new key at capacity first evicts
    /// one arbitrary existing entry. Replacing an existing key never evicts,
    /// since the store does not grow.
    pub fn set_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let expires_at = expiration_from_ttl(ttl);

        if let Capacity::Bounded(max) = self.capacity {
            if self.entries.len() + 1 > max && !self.entries.contains_key(&key) {
                self.evict(1);
            }
        }

        self.entries
            .insert(key, CacheEntry::with_expiration(value, expires_at));
    }

    // == Set All ==
    /// Inserts or replaces every pair in `batch` using the default TTL.
    pub fn set_all(&mut self, batch: HashMap<K, V>) {
        self.set_all_with_ttl(batch, self.default_ttl);
    }

    /// Inserts or replaces every pair in `batch`, all sharing one expiration
    /// instant computed up front.
    ///
    /// Under a bounded policy the overflow is computed from the batch length
    /// before inserting. When the overflow covers the whole store, the store
    /// is cleared in one step and reallocated with room for the batch;
    /// otherwise exactly `overflow` arbitrary entries are evicted. A batch
    /// larger than the limit ends up stored in full.
    pub fn set_all_with_ttl(&mut self, batch: HashMap<K, V>, ttl: Option<Duration>) {
        let expires_at = expiration_from_ttl(ttl);

        let overflow = self.capacity.overflow(self.entries.len(), batch.len());
        if overflow > 0 {
            if overflow >= self.entries.len() {
                self.entries = HashMap::with_capacity(batch.len());
            } else {
                self.evict(overflow);
            }
        }

        for (key, value) in batch {
            self.entries
                .insert(key, CacheEntry::with_expiration(value, expires_at));
        }
    }

    // == Evict ==
    /// Removes exactly `count` entries in map iteration order, which is
    /// unspecified.
    fn evict(&mut self, count: usize) {
        let victims: Vec<K> = self.entries.keys().take(count).cloned().collect();
        for key in victims {
            self.entries.remove(&key);
        }
    }

    // == Remove ==
    /// Deletes `key` if present; absent keys are a no-op.
    pub fn remove(&mut self, key: &K) {
        self.entries.remove(key);
    }

    // == Clear ==
    /// Removes all entries, reallocating with the capacity hint so a bounded
    /// store keeps room for its limit.
    pub fn clear(&mut self) {
        self.entries = HashMap::with_capacity(self.capacity.store_hint());
    }

    // == Sweep ==
    /// Collects the keys whose entries are stale as of `now`.
    ///
    /// Scan phase of the two-phase sweep; takes `&self` so it can run under
    /// a read lock while other readers proceed.
    pub fn expired_keys(&self, now: Instant) -> Vec<K> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Deletes the given keys and returns how many were actually present.
    ///
    /// Delete phase of the two-phase sweep.
    pub fn remove_keys(&mut self, keys: &[K]) -> usize {
        let mut removed = 0;
        for key in keys {
            if self.entries.remove(key).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Single-call sweep with "now" sampled once at the start.
    pub fn clean_expired(&mut self) -> usize {
        let keys = self.expired_keys(Instant::now());
        self.remove_keys(&keys)
    }

    // == Length ==
    /// Number of entries currently stored, including expired ones that have
    /// not been swept yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
