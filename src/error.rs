//! Error types for the folder cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::source::FolderId;

// == Fetch Error Enum ==
/// Failure reported by a fetch function.
///
/// Cloneable because a single failed fetch is handed to every caller
/// sharing the in-flight lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The parent folder does not exist upstream
    #[error("Folder not found: {0}")]
    NotFound(FolderId),

    /// The upstream source failed
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),
}

// == Cache Error Enum ==
/// Unified error type for the folder cache.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Lookup attempted before a fetch function was set
    #[error("Folder cache is not configured: no fetch function set")]
    NotConfigured,

    /// No cached lookup exists for the folder
    #[error("Folder not cached: {0}")]
    NotCached(FolderId),

    /// Construction-time configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fetch function failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Internal error (poisoned lock)
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::NotCached(_) | CacheError::Fetch(FetchError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            CacheError::Fetch(FetchError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidConfig(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the folder cache.
pub type Result<T> = std::result::Result<T, CacheError>;
