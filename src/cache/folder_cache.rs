//! Folder Cache Module
//!
//! Memoizes recursive subfolder lookups behind a bounded, time-expiring store.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::cache::{
    CacheEntry, CacheStats, CacheStore, Clock, SubfolderIds, SubfolderLookup, SystemClock,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, FetchError, Result};
use crate::source::{FetchFn, FetchResult, FolderId};

// == Elastic Folder Cache ==
/// Cache of "parent plus all descendants" folder id lists.
///
/// Each parent id maps to one shared lookup. Callers arriving while a fetch
/// is in flight receive the same handle, so the fetch function runs at most
/// once per key per freshness window.
///
/// Entries leave the cache when:
/// - the store is full and a new key misses (oldest insertion first)
/// - the key is looked up after its freshness window elapsed
/// - the key is looked up after its fetch resolved to an error
///
/// There is no background sweep.
pub struct ElasticFolderCache {
    config: CacheConfig,
    store: Mutex<CacheStore>,
    fetch: RwLock<Option<FetchFn>>,
    clock: Arc<dyn Clock>,
}

impl ElasticFolderCache {
    // == Constructors ==
    /// Creates a cache using the wall clock.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            store: Mutex::new(CacheStore::new(config)),
            fetch: RwLock::new(None),
            clock,
        }
    }

    // == Fetch Function ==
    /// Sets the function used to fetch descendants on a cache miss.
    ///
    /// Replacing the function affects later misses only; lookups already
    /// cached keep the function they were created with.
    pub fn set_fetch_function<F, Fut>(&self, fetch: F)
    where
        F: Fn(FolderId) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchResult> + Send + 'static,
    {
        self.set_fetch_fn(Arc::new(move |parent_id| fetch(parent_id).boxed()));
    }

    /// Sets an already type-erased fetch function.
    pub fn set_fetch_fn(&self, fetch: FetchFn) {
        let mut slot = self.fetch.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = slot.replace(fetch).is_some();
        info!(replaced, "Folder cache fetch function set");
    }

    // == Is Configured ==
    /// Returns true once a fetch function has been set.
    pub fn is_configured(&self) -> bool {
        self.fetch
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn fetch_fn(&self) -> Result<FetchFn> {
        self.fetch
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(CacheError::NotConfigured)
    }

    // == Get All Subfolders Of ==
    /// Returns a shared handle resolving to the descendant ids of `parent_id`
    /// followed by `parent_id` itself.
    ///
    /// Fails immediately with [`CacheError::NotConfigured`] if no fetch
    /// function was set. Fetch failures surface through the handle.
    ///
    /// The fetch starts when the handle is first polled. A handle dropped
    /// unpolled leaves its entry cached with no fetch running; the entry
    /// still ages from insertion, so a later hit that starts the fetch gets
    /// less of the freshness window.
    pub fn get_all_subfolders_of(&self, parent_id: FolderId) -> Result<SubfolderLookup> {
        let now = self.clock.now_secs();
        let fetch = self.fetch_fn()?;
        let mut store = self.lock_store()?;

        if let Some(lookup) = store.lookup(parent_id, now) {
            debug!(parent_id, "Folder cache hit");
            return Ok(lookup);
        }

        debug!(parent_id, "Folder cache miss");
        let lookup = Self::shared_lookup(fetch, parent_id);
        store.insert(parent_id, CacheEntry::new(lookup.clone(), now));

        Ok(lookup)
    }

    /// Awaits [`get_all_subfolders_of`](Self::get_all_subfolders_of).
    pub async fn subfolders_of(&self, parent_id: FolderId) -> Result<SubfolderIds> {
        let lookup = self.get_all_subfolders_of(parent_id)?;
        Ok(lookup.await?)
    }

    // The fetch function is only called once the handle is first polled,
    // never while the store lock is held.
    fn shared_lookup(fetch: FetchFn, parent_id: FolderId) -> SubfolderLookup {
        async move {
            let folders = fetch(parent_id).await.map_err(|error| {
                warn!(parent_id, %error, "Subfolder fetch failed");
                error
            })?;

            let mut ids: Vec<FolderId> = folders.into_iter().map(|folder| folder.id).collect();
            ids.push(parent_id);
            debug!(parent_id, count = ids.len(), "Subfolder fetch resolved");
            Ok::<_, FetchError>(Arc::new(ids))
        }
        .boxed()
        .shared()
    }

    // == Maintenance ==
    /// Drops the cached lookup for `parent_id`. Returns whether one existed.
    pub fn invalidate(&self, parent_id: FolderId) -> Result<bool> {
        let removed = self.lock_store()?.remove(parent_id);
        debug!(parent_id, removed, "Folder cache entry invalidated");
        Ok(removed)
    }

    // == Clear ==
    /// Drops every cached lookup. Not counted as evictions.
    pub fn clear(&self) -> Result<()> {
        self.lock_store()?.clear();
        info!("Folder cache cleared");
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> Result<CacheStats> {
        Ok(self.lock_store()?.stats())
    }

    // == Length ==
    /// Returns the current number of cached lookups.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock_store()?.len())
    }

    // == Is Empty ==
    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock_store()?.is_empty())
    }

    // == Config ==
    /// Returns the limits this cache was built with.
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, CacheStore>> {
        self.store
            .lock()
            .map_err(|_| CacheError::Internal("folder cache store lock poisoned".to_string()))
    }
}

impl Default for ElasticFolderCache {
    fn default() -> Self {
        Self::build(CacheConfig::default(), Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for ElasticFolderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticFolderCache")
            .field("config", &self.config)
            .field("configured", &self.is_configured())
            .field("clock", &self.clock)
            .finish()
    }
}
