//! API Handlers
//!
//! HTTP request handlers for each folder cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::ElasticFolderCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, InvalidateResponse, StatsResponse, SubfoldersResponse};
use crate::source::{FolderId, FolderTree};

/// Application state shared across all handlers.
///
/// The cache locks internally, so a plain Arc is enough.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ElasticFolderCache>,
}

impl AppState {
    pub fn new(cache: ElasticFolderCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates the cache from configuration, serving lookups from `tree` if given.
    pub fn from_config(config: &Config, tree: Option<FolderTree>) -> Result<Self> {
        let cache = ElasticFolderCache::new(config.cache)?;
        if let Some(tree) = tree {
            cache.set_fetch_fn(Arc::new(tree).fetch_fn());
        }
        Ok(Self::new(cache))
    }
}

/// Handler for GET /folders/:id/subfolders
pub async fn subfolders_handler(
    State(state): State<AppState>,
    Path(folder_id): Path<FolderId>,
) -> Result<Json<SubfoldersResponse>> {
    let ids = state.cache.subfolders_of(folder_id).await?;
    Ok(Json(SubfoldersResponse::new(folder_id, &ids)))
}

/// Handler for DELETE /cache/:id
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(folder_id): Path<FolderId>,
) -> Result<Json<InvalidateResponse>> {
    if state.cache.invalidate(folder_id)? {
        Ok(Json(InvalidateResponse::folder(folder_id)))
    } else {
        Err(CacheError::NotCached(folder_id))
    }
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<InvalidateResponse>> {
    state.cache.clear()?;
    Ok(Json(InvalidateResponse::all()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.cache.stats()?;
    Ok(Json(StatsResponse::new(&stats, state.cache.config())))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.is_configured()))
}
