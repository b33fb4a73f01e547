//! Cache Entry Module
//!
//! Defines a cached lookup: when it was created and the shared handle to its result.

use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, Shared};

use crate::error::FetchError;
use crate::source::FolderId;

/// Resolved value of a lookup: descendant ids followed by the parent id
pub type SubfolderIds = Arc<Vec<FolderId>>;

/// Shared, lazily-driven handle to a lookup result.
///
/// Cloning the handle never triggers another fetch; every clone observes the
/// same computation.
pub type SubfolderLookup =
    Shared<BoxFuture<'static, std::result::Result<SubfolderIds, FetchError>>>;

// == Cache Entry ==
/// A single cached lookup.
#[derive(Clone)]
pub struct CacheEntry {
    /// Unix seconds at which the entry was populated
    pub timestamp: i64,
    /// Shared handle to the pending or resolved lookup
    pub value: SubfolderLookup,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: SubfolderLookup, timestamp: i64) -> Self {
        Self { timestamp, value }
    }

    /// Seconds elapsed since the entry was populated.
    pub fn age_secs(&self, now: i64) -> i64 {
        now - self.timestamp
    }

    // == Is Stale ==
    /// Checks if the entry has outlived the freshness window.
    ///
    /// Boundary condition: an entry aged exactly `max_age_secs` is still fresh;
    /// it becomes stale one second later.
    pub fn is_stale(&self, now: i64, max_age_secs: u64) -> bool {
        self.age_secs(now) > i64::try_from(max_age_secs).unwrap_or(i64::MAX)
    }

    /// True once the shared lookup has resolved to an error.
    pub fn has_failed(&self) -> bool {
        matches!(self.value.peek(), Some(Err(_)))
    }

    /// True once the shared lookup has resolved, successfully or not.
    pub fn is_resolved(&self) -> bool {
        self.value.peek().is_some()
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("timestamp", &self.timestamp)
            .field("resolved", &self.is_resolved())
            .field("failed", &self.has_failed())
            .finish()
    }
}
