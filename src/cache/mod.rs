//! Cache Module
//!
//! Bounded, time-expiring memoization of recursive folder lookups with
//! FIFO eviction and shared in-flight fetches.

mod clock;
mod entry;
mod fifo;
mod folder_cache;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, SubfolderIds, SubfolderLookup};
pub use fifo::FifoTracker;
pub use folder_cache::ElasticFolderCache;
pub use stats::CacheStats;
pub use store::CacheStore;
