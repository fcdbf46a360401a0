//! Cache Module
//!
//! Core storage for the TTL cache: entries, the capacity policy, and the
//! unlocked map engine wrapped by `TtlCache`.

mod capacity;
mod entry;
mod store;


// Re-export public types
pub use capacity::Capacity;
pub use entry::CacheEntry;
pub use store::CacheStore;
