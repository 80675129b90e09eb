//! Pricing service functions with collaborator access.
//!
//! These glue the pure calculators to the catalog cache and the booking sink.

use std::sync::Arc;

use crate::error::Result;
use crate::AppState;

use super::calculators::{self, AllocationResult};
use super::catalog::load_catalog;
use super::models::{Booking, Catalog, PriceBreakdown, Selection};
use super::sources::CatalogSource;

/// Result of pricing a selection
#[derive(Debug, Clone)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub per_person: AllocationResult,
}

/// Fetch raw rows from `source` and build a catalog from them
pub async fn fetch_catalog(source: &dyn CatalogSource) -> Result<Catalog> {
    let records = source.fetch_records().await?;
    let catalog = load_catalog(&records.venue_records, &records.travel_records)?;
    Ok(catalog)
}

/// Catalog snapshot currently in use
pub async fn current_catalog(state: &AppState) -> Result<Arc<Catalog>> {
    state
        .cache
        .catalog_or_load(state.catalog_source.as_ref())
        .await
}

/// Load a fresh catalog and replace the cached one.
///
/// On failure the previous snapshot keeps being served.
pub async fn refresh_catalog(state: &AppState) -> Result<Arc<Catalog>> {
    state
        .cache
        .refresh_catalog(state.catalog_source.as_ref())
        .await
}

/// Price a selection without booking it
pub async fn quote(state: &AppState, selection: &Selection) -> Result<Quote> {
    let catalog = current_catalog(state).await?;
    let breakdown = calculators::compute_total(&catalog, selection)?;
    let per_person = calculators::split_per_person(
        breakdown.total_cost,
        selection.party_size,
        &state.currency,
    );

    Ok(Quote {
        breakdown,
        per_person,
    })
}

/// Price a selection and append the resulting booking to the sink.
///
/// The total is always recomputed here; a client-side figure is never trusted.
pub async fn submit_booking(state: &AppState, selection: &Selection) -> Result<Booking> {
    let catalog = current_catalog(state).await?;
    let breakdown = calculators::compute_total(&catalog, selection)?;
    let booking = calculators::build_booking_record(selection, breakdown.total_cost);

    state.booking_sink.append(&booking).await?;

    tracing::info!(
        booking_id = %booking.id,
        party_size = booking.party_size,
        venues = booking.chosen_venues.len(),
        total_cost = %booking.total_cost,
        "Booking submitted"
    );

    Ok(booking)
}
