//! API Module
//!
//! HTTP handlers and routing for the folder cache REST API.
//!
//! # Endpoints
//! - `GET /folders/:id/subfolders` - Folder id plus all descendant ids
//! - `DELETE /cache/:id` - Drop one cached lookup
//! - `DELETE /cache` - Drop every cached lookup
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
