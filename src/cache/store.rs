//! Cache Store Module
//!
//! Keyed storage of lookups with FIFO eviction and lazy expiry.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, FifoTracker, SubfolderLookup};
use crate::config::CacheConfig;
use crate::source::FolderId;

// == Cache Store ==
/// Parent id to cached lookup, bounded in size.
///
/// Only the owning [`ElasticFolderCache`](crate::cache::ElasticFolderCache)
/// mutates a store.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<FolderId, CacheEntry>,
    /// Insertion order for eviction
    order: FifoTracker,
    stats: CacheStats,
    max_cache_size: usize,
    max_age_secs: u64,
}

impl CacheStore {
    // == Constructor ==
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoTracker::new(),
            stats: CacheStats::new(),
            max_cache_size: config.max_cache_size,
            max_age_secs: config.max_age_secs,
        }
    }

    // == Lookup ==
    /// Returns the cached lookup for `key` if it is still usable at `now`.
    ///
    /// Stale entries and entries whose fetch already failed are removed and
    /// reported as a miss. Hits neither refresh the timestamp nor reorder the
    /// eviction queue.
    pub fn lookup(&mut self, key: FolderId, now: i64) -> Option<SubfolderLookup> {
        if let Some(entry) = self.entries.get(&key) {
            if entry.is_stale(now, self.max_age_secs) {
                debug!(key, age = entry.age_secs(now), "Removing stale entry");
                self.remove_entry(key);
                self.stats.record_expiration();
            } else if entry.has_failed() {
                debug!(key, "Removing failed entry");
                self.remove_entry(key);
                self.stats.record_dropped_failure();
            } else {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
        }

        self.stats.record_miss();
        None
    }

    // == Insert ==
    /// Stores an entry, first evicting oldest insertions until there is room.
    pub fn insert(&mut self, key: FolderId, entry: CacheEntry) {
        self.remove_entry(key);
        self.make_room();

        self.entries.insert(key, entry);
        self.order.push(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Make Room ==
    /// Evicts in insertion order until the store is below its size limit.
    ///
    /// Returns the number of entries evicted.
    pub fn make_room(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() >= self.max_cache_size {
            let Some(oldest) = self.order.evict_oldest() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                debug!(key = oldest, "Evicting oldest entry");
                self.stats.record_eviction();
                evicted += 1;
            }
        }
        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Remove ==
    /// Removes an entry by key. Returns whether it was present.
    pub fn remove(&mut self, key: FolderId) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes all entries without counting evictions.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    fn remove_entry(&mut self, key: FolderId) -> bool {
        let removed = self.entries.remove(&key).is_some();
        if removed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Contains ==
    /// Checks if an entry exists for `key`, fresh or not.
    pub fn contains(&self, key: FolderId) -> bool {
        self.entries.contains_key(&key)
    }

    // == Oldest ==
    /// Oldest inserted key, the next eviction candidate.
    pub fn oldest(&self) -> Option<FolderId> {
        self.order.peek_oldest()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
