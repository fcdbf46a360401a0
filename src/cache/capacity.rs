//! Capacity Policy Module
//!
//! Size policy applied by the write path: unbounded inserts, or a hard entry
//! limit maintained by evicting arbitrary existing entries.

// == Capacity ==
/// Write-path size policy.
///
/// `Unbounded` performs plain inserts. `Bounded` keeps the entry count at or
/// below the limit by evicting arbitrary entries before a growing insert.
/// Eviction order is whatever the map yields first; it is neither LRU nor
/// FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// No size limit
    Unbounded,
    /// At most this many entries after a single-key write
    Bounded(usize),
}

impl Capacity {
    // == Constructor ==
    /// Builds a policy from an optional limit; `None` or zero = unbounded.
    pub fn from_limit(max_size: Option<usize>) -> Self {
        match max_size {
            Some(max) if max > 0 => Capacity::Bounded(max),
            _ => Capacity::Unbounded,
        }
    }

    // == Store Hint ==
    /// Capacity hint used when (re)allocating the underlying map.
    ///
    /// A bounded store pre-allocates room for its limit; an unbounded store
    /// starts empty.
    pub fn store_hint(&self) -> usize {
        match self {
            Capacity::Unbounded => 0,
            Capacity::Bounded(max) => *max,
        }
    }

    // == Overflow ==
    /// Number of entries to evict before inserting `incoming` new entries so
    /// the store stays within the limit.
    ///
    /// The count is computed from the raw batch length: keys that merely
    /// replace existing entries are not deduplicated, so an overlapping
    /// batch can evict more entries than the final size strictly requires.
    pub fn overflow(&self, current: usize, incoming: usize) -> usize {
        match self {
            Capacity::Unbounded => 0,
            Capacity::Bounded(max) => (current + incoming).saturating_sub(*max),
        }
    }

    // == Is Bounded ==
    /// Whether this policy enforces a limit.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Capacity::Bounded(_))
    }
}
