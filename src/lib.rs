//! Folder Cache - memoized recursive folder lookups
//!
//! Bounded, time-expiring cache of "folder plus all descendants" id lists,
//! with FIFO eviction and one shared fetch per key in flight.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use api::AppState;
pub use cache::ElasticFolderCache;
pub use config::{CacheConfig, Config};
pub use error::{CacheError, FetchError};
