//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus its expiration instant.
///
/// Entries are immutable once created; replacing a key replaces the whole
/// entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry whose expiration is computed from `ttl`.
    ///
    /// A `None` or zero TTL produces an entry that never expires; a TTL is
    /// never interpreted as "already expired".
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: expiration_from_ttl(ttl),
        }
    }

    /// Creates an entry with a precomputed expiration instant.
    ///
    /// Batch writes share one instant across all their entries.
    pub fn with_expiration(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale as of `now`.
    ///
    /// Boundary condition: an entry is still live at exactly `expires_at`
    /// and becomes stale strictly after it.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Computes the absolute expiration instant for a TTL.
///
/// Returns `None` when the TTL is absent or zero, meaning the entry never
/// expires.
pub fn expiration_from_ttl(ttl: Option<Duration>) -> Option<Instant> {
    match ttl {
        Some(ttl) if ttl > Duration::ZERO => Some(Instant::now() + ttl),
        _ => None,
    }
}
