//! Response DTOs for the folder cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::config::CacheConfig;
use crate::source::FolderId;

/// Response body for GET /folders/:id/subfolders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubfoldersResponse {
    /// The queried parent folder
    pub folder_id: FolderId,
    /// Descendant ids followed by the parent id
    pub ids: Vec<FolderId>,
    pub count: usize,
}

impl SubfoldersResponse {
    pub fn new(folder_id: FolderId, ids: &[FolderId]) -> Self {
        Self {
            folder_id,
            ids: ids.to_vec(),
            count: ids.len(),
        }
    }
}

/// Response body for DELETE /cache and DELETE /cache/:id
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
}

impl InvalidateResponse {
    pub fn folder(folder_id: FolderId) -> Self {
        Self {
            message: format!("Folder {} invalidated", folder_id),
        }
    }

    pub fn all() -> Self {
        Self {
            message: "Folder cache cleared".to_string(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub dropped_failures: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    pub max_cache_size: usize,
    pub max_age_secs: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, config: CacheConfig) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            dropped_failures: stats.dropped_failures,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            max_cache_size: config.max_cache_size,
            max_age_secs: config.max_age_secs,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether a fetch function is set
    pub configured: bool,
}

impl HealthResponse {
    pub fn healthy(configured: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            configured,
        }
    }
}
