//! Pricing engine module for the beer-hopping planner.
//!
//! Turns a user's selection of venues, beers, travel and table reservation
//! into a total cost, and turns a priced selection into a booking record.
//! `catalog`, `calculators` and `models` are pure; `services` wires them to
//! the catalog cache and the booking sink.

pub mod calculators;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod sink;
pub mod sources;

// Re-export commonly used items
pub use calculators::{
    build_booking_record, compute_total, round_money, split_per_person, AllocationResult,
    MAX_VENUES,
};
pub use catalog::{load_catalog, parse_amount};
pub use errors::{CatalogError, SelectionError};
pub use models::{
    Beer, Booking, Catalog, LineItem, LineSource, PriceBreakdown, RawRecord, Selection,
    TravelOption, Venue,
};
pub use routes::router;
pub use sink::{BookingSink, InMemoryBookingSink, PgBookingSink};
pub use sources::{CatalogSource, PgCatalogSource, RawCatalog, StaticCatalogSource};
