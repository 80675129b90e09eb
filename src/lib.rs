//! Plannabe pricing and booking service.
//!
//! The pricing core lives in [`pricing`]; this crate root wires it into an
//! axum application with a catalog cache and a booking sink.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::pricing::{BookingSink, CatalogSource};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: AppCache,
    pub catalog_source: Arc<dyn CatalogSource>,
    pub booking_sink: Arc<dyn BookingSink>,
    pub currency: String,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
