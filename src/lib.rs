//! ttl-cache - A generic in-memory key-value cache with TTL expiration
//!
//! Entries optionally expire after a per-entry or default time-to-live, a
//! background task can sweep expired entries on a fixed interval, and an
//! optional size bound is enforced at write time by evicting arbitrary
//! entries (not LRU).
//!
//! # Example
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use ttl_cache::{CacheConfig, TtlCache};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // Default expiration of 1s, sweep every 2s, at most 5 entries.
//! let cache: TtlCache<String, String> = TtlCache::new(
//!     CacheConfig::new()
//!         .with_default_ttl(Duration::from_secs(1))
//!         .with_cleanup_interval(Duration::from_secs(2))
//!         .with_max_size(5),
//! );
//!
//! // Default expiration, explicit expiration, batch insert.
//! cache.set("key".to_string(), "x".to_string()).await;
//! cache
//!     .set_with_ttl("key_1h".to_string(), "x".to_string(), Some(Duration::from_secs(3600)))
//!     .await;
//! cache
//!     .set_all(HashMap::from([
//!         ("key_map1".to_string(), "x".to_string()),
//!         ("key_map2".to_string(), "x".to_string()),
//!     ]))
//!     .await;
//!
//! // Plain read, expiration-checked read, read with a default on miss.
//! assert_eq!(cache.get(&"key".to_string()).await, Some("x".to_string()));
//! assert_eq!(cache.get_safe(&"key".to_string()).await, Some("x".to_string()));
//! assert_eq!(cache.get_value(&"zzz".to_string()).await, String::new());
//!
//! cache.close().await;
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod ttl_cache;

pub(crate) mod tasks;

pub use cache::{CacheEntry, CacheStore, Capacity};
pub use config::CacheConfig;
pub use error::ConfigError;
pub use ttl_cache::TtlCache;
