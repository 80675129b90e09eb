//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::calculators::{AllocationResult, MAX_VENUES};
use super::models::{Booking, Catalog, LineItem, PriceBreakdown};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// A beer on a venue's menu
#[derive(Debug, Serialize)]
pub struct BeerResponse {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// A venue as listed for selection
#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub table_fee: Decimal,
    pub rating: Option<f64>,
    pub secondary_rating: Option<f64>,
    pub beers: Vec<BeerResponse>,
}

/// A travel option as listed for selection
#[derive(Debug, Serialize)]
pub struct TravelOptionResponse {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// Response for the catalog listing
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub currency: String,
    pub max_venues: usize,
    pub venues: Vec<VenueResponse>,
    pub travel_options: Vec<TravelOptionResponse>,
}

impl CatalogResponse {
    pub fn new(catalog: &Catalog, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            max_venues: MAX_VENUES,
            venues: catalog
                .venues()
                .iter()
                .map(|venue| VenueResponse {
                    name: venue.name.clone(),
                    table_fee: venue.table_fee,
                    rating: venue.rating,
                    secondary_rating: venue.secondary_rating,
                    beers: venue
                        .beers
                        .iter()
                        .map(|beer| BeerResponse {
                            name: beer.name.clone(),
                            price: beer.price,
                        })
                        .collect(),
                })
                .collect(),
            travel_options: catalog
                .travel_options()
                .iter()
                .map(|option| TravelOptionResponse {
                    name: option.name.clone(),
                    price: option.price,
                })
                .collect(),
        }
    }
}

/// Response for shared cost allocation
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub per_person: MoneyResponse,
    pub amounts: Vec<MoneyResponse>,
}

impl From<AllocationResult> for AllocationResponse {
    fn from(result: AllocationResult) -> Self {
        Self {
            per_person: result.per_person,
            amounts: result.amounts,
        }
    }
}

/// Response for a price quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub total: MoneyResponse,
    pub line_items: Vec<LineItem>,
    pub per_person: AllocationResponse,
}

impl QuoteResponse {
    pub fn new(breakdown: PriceBreakdown, per_person: AllocationResult, currency: &str) -> Self {
        Self {
            total: MoneyResponse {
                amount: breakdown.total_cost,
                currency: currency.to_string(),
            },
            line_items: breakdown.line_items,
            per_person: per_person.into(),
        }
    }
}

/// Response for a submitted booking
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub party_size: u32,
    pub chosen_venues: Vec<String>,
    pub chosen_beers: BTreeMap<String, Vec<String>>,
    pub travel_choice: String,
    pub reservation_opt_out: bool,
    pub total_cost: MoneyResponse,
    pub created_at: DateTime<Utc>,
}

impl BookingResponse {
    pub fn new(booking: Booking, currency: &str) -> Self {
        Self {
            id: booking.id,
            party_size: booking.party_size,
            chosen_venues: booking.chosen_venues,
            chosen_beers: booking.chosen_beers,
            travel_choice: booking.travel_choice,
            reservation_opt_out: booking.reservation_opt_out,
            total_cost: MoneyResponse {
                amount: booking.total_cost,
                currency: currency.to_string(),
            },
            created_at: booking.created_at,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
