//! FIFO Tracker Module
//!
//! Insertion-order tracking for cache eviction.

use std::collections::VecDeque;

use crate::source::FolderId;

// == FIFO Tracker ==
/// Tracks insertion order for FIFO eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest insertion (next eviction candidate)
/// - Back = Newest insertion
///
/// Reads never reorder keys.
#[derive(Debug, Default)]
pub struct FifoTracker {
    order: VecDeque<FolderId>,
}

impl FifoTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Records an insertion. A key already tracked is moved to the back,
    /// since re-inserting replaces the old entry.
    pub fn push(&mut self, key: FolderId) {
        self.remove(key);
        self.order.push_back(key);
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: FolderId) {
        self.order.retain(|k| *k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest inserted key.
    pub fn evict_oldest(&mut self) -> Option<FolderId> {
        self.order.pop_front()
    }

    pub fn peek_oldest(&self) -> Option<FolderId> {
        self.order.front().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    #[cfg(test)]
    pub fn contains(&self, key: FolderId) -> bool {
        self.order.contains(&key)
    }
}
