//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use folder_cache::{
    api::create_router,
    source::{Folder, FolderTree},
    AppState, CacheConfig, Config, ElasticFolderCache,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn sample_tree() -> FolderTree {
    FolderTree::from_folders([
        Folder::new(1, "Root", None),
        Folder::new(2, "News", Some(1)),
        Folder::new(3, "Products", Some(1)),
        Folder::new(4, "2024", Some(2)),
    ])
}

fn create_test_app() -> Router {
    let state = AppState::from_config(&Config::default(), Some(sample_tree())).unwrap();
    create_router(state)
}

/// App whose fetch function counts its calls.
fn create_counting_app(config: CacheConfig) -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let tree = Arc::new(sample_tree());
    let cache = ElasticFolderCache::new(config).unwrap();
    {
        let calls = Arc::clone(&calls);
        cache.set_fetch_function(move |parent_id| {
            calls.fetch_add(1, Ordering::SeqCst);
            let tree = Arc::clone(&tree);
            async move { tree.descendants(parent_id) }
        });
    }
    (create_router(AppState::new(cache)), calls)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == Subfolders Endpoint Tests ==

#[tokio::test]
async fn test_subfolders_returns_descendants_and_parent() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/folders/1/subfolders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "folderId": 1, "ids": [2, 3, 4, 1], "count": 4 }));
}

#[tokio::test]
async fn test_subfolders_of_leaf() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/folders/4/subfolders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ids"], json!([4]));
}

#[tokio::test]
async fn test_subfolders_unknown_folder() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/folders/99/subfolders").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn test_subfolders_unconfigured_cache() {
    let state = AppState::from_config(&Config::default(), None).unwrap();
    let app = create_router(state);

    let (status, json) = send(&app, "GET", "/folders/1/subfolders").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_repeat_lookup_is_served_from_cache() {
    let (app, calls) = create_counting_app(CacheConfig::default());

    send(&app, "GET", "/folders/1/subfolders").await;
    send(&app, "GET", "/folders/1/subfolders").await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let (_, stats) = send(&app, "GET", "/stats").await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["totalEntries"], 1);
}

#[tokio::test]
async fn test_eviction_at_capacity_triggers_refetch() {
    let (app, calls) = create_counting_app(CacheConfig::new(2, 60).unwrap());

    for id in [1, 2, 3] {
        send(&app, "GET", &format!("/folders/{}/subfolders", id)).await;
    }
    send(&app, "GET", "/folders/1/subfolders").await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);

    let (_, stats) = send(&app, "GET", "/stats").await;
    assert_eq!(stats["evictions"], 2);
    assert_eq!(stats["totalEntries"], 2);
    assert_eq!(stats["maxCacheSize"], 2);
}

// == Invalidation Tests ==

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let (app, calls) = create_counting_app(CacheConfig::default());

    send(&app, "GET", "/folders/2/subfolders").await;
    let (status, json) = send(&app, "DELETE", "/cache/2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains('2'));

    send(&app, "GET", "/folders/2/subfolders").await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalidate_uncached_folder() {
    let app = create_test_app();

    let (status, json) = send(&app, "DELETE", "/cache/3").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_clear_cache() {
    let app = create_test_app();
    send(&app, "GET", "/folders/1/subfolders").await;
    send(&app, "GET", "/folders/2/subfolders").await;

    let (status, _) = send(&app, "DELETE", "/cache").await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&app, "GET", "/stats").await;
    assert_eq!(stats["totalEntries"], 0);
}

// == Stats & Health Tests ==

#[tokio::test]
async fn test_stats_initial_state() {
    let app = create_test_app();

    let (status, stats) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["hits"], 0);
    assert_eq!(stats["misses"], 0);
    assert_eq!(stats["hitRate"], 0.0);
    assert_eq!(stats["maxCacheSize"], 30);
    assert_eq!(stats["maxAgeSecs"], 60);
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "healthy", "configured": true }));
}
