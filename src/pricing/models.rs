//! Domain models for the pricing engine.
//!
//! A [`Catalog`] is built once by [`load_catalog`](super::catalog::load_catalog)
//! and only read afterwards. A [`Selection`] is the user's in-progress choice,
//! and a [`Booking`] is the immutable record handed to a booking sink.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One raw catalog row: field label -> spreadsheet value.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A beer on a venue's menu
#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    pub name: String,
    pub price: Decimal,
}

/// A pub with a table reservation fee and a priced beer menu
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub name: String,
    pub table_fee: Decimal,
    pub rating: Option<f64>,
    pub secondary_rating: Option<f64>,
    /// Menu in first-seen order; names are unique.
    pub beers: Vec<Beer>,
}

impl Venue {
    /// Price of a beer on this venue's menu
    pub fn beer_price(&self, name: &str) -> Option<Decimal> {
        self.beers.iter().find(|b| b.name == name).map(|b| b.price)
    }
}

/// A way of getting the party around for the evening
#[derive(Debug, Clone, PartialEq)]
pub struct TravelOption {
    pub name: String,
    pub price: Decimal,
}

/// Immutable snapshot of all venues and travel options for a booking session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    venues: Vec<Venue>,
    venue_index: HashMap<String, usize>,
    travel_options: Vec<TravelOption>,
    travel_index: HashMap<String, usize>,
}

impl Catalog {
    pub(crate) fn from_parts(venues: Vec<Venue>, travel_options: Vec<TravelOption>) -> Self {
        let venue_index = venues
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.clone(), i))
            .collect();
        let travel_index = travel_options
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();

        Self {
            venues,
            venue_index,
            travel_options,
            travel_index,
        }
    }

    /// Venues in the order they first appeared in the source rows
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venue_index.get(name).map(|&i| &self.venues[i])
    }

    /// Travel options in the order they first appeared in the source rows
    pub fn travel_options(&self) -> &[TravelOption] {
        &self.travel_options
    }

    pub fn travel_price(&self, name: &str) -> Option<Decimal> {
        self.travel_index
            .get(name)
            .map(|&i| self.travel_options[i].price)
    }
}

/// The user's choices before submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub party_size: u32,
    #[serde(default)]
    pub chosen_venues: Vec<String>,
    /// Venue name -> beers picked there. A set: picking a beer twice costs once.
    #[serde(default)]
    pub chosen_beers: BTreeMap<String, BTreeSet<String>>,
    pub travel_choice: String,
    #[serde(default)]
    pub reservation_opt_out: bool,
}

/// What a line item pays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    Travel,
    TableFee,
    Beer,
}

/// One additive contribution to a total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub source: LineSource,
    pub venue: Option<String>,
    pub beer: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl LineItem {
    pub fn travel(amount: Decimal) -> Self {
        Self {
            source: LineSource::Travel,
            venue: None,
            beer: None,
            amount,
        }
    }

    pub fn table_fee(venue: &Venue) -> Self {
        Self {
            source: LineSource::TableFee,
            venue: Some(venue.name.clone()),
            beer: None,
            amount: venue.table_fee,
        }
    }

    pub fn beer(venue: &Venue, beer: &str, amount: Decimal) -> Self {
        Self {
            source: LineSource::Beer,
            venue: Some(venue.name.clone()),
            beer: Some(beer.to_string()),
            amount,
        }
    }
}

/// Total cost of a selection with its contributions
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub total_cost: Decimal,
    pub line_items: Vec<LineItem>,
}

/// Finalized booking as appended to the sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub party_size: u32,
    pub chosen_venues: Vec<String>,
    pub chosen_beers: BTreeMap<String, Vec<String>>,
    pub travel_choice: String,
    pub reservation_opt_out: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}
