//! Pricing API route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

use super::models::Selection;
use super::requests::SelectionRequest;
use super::responses::{BookingResponse, CatalogResponse, QuoteResponse};
use super::services;

/// Routes for catalog listing, quotes and bookings
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/catalog", get(catalog))
        .route("/api/catalog/refresh", post(refresh_catalog))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/quote", post(quote))
        .route("/api/bookings", post(create_booking))
}

/// Venues and travel options available for selection
async fn catalog(State(state): State<AppState>) -> Result<Json<CatalogResponse>> {
    let catalog = services::current_catalog(&state).await?;
    Ok(Json(CatalogResponse::new(&catalog, &state.currency)))
}

/// Reload the catalog from its source
async fn refresh_catalog(State(state): State<AppState>) -> Result<Json<CatalogResponse>> {
    let catalog = services::refresh_catalog(&state).await?;
    Ok(Json(CatalogResponse::new(&catalog, &state.currency)))
}

/// Catalog cache state for monitoring
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Price the current selection; called on every form change
async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let selection = Selection::from(request);
    let quote = services::quote(&state, &selection).await?;
    Ok(Json(QuoteResponse::new(
        quote.breakdown,
        quote.per_person,
        &state.currency,
    )))
}

/// Submit the selection as a booking
async fn create_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let Json(request) = payload?;
    let selection = Selection::from(request);
    let booking = services::submit_booking(&state, &selection).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse::new(booking, &state.currency)),
    ))
}
