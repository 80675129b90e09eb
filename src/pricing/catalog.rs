//! Catalog construction from raw spreadsheet-style rows.
//!
//! Pure functions - no database access. Venue rows arrive one per
//! (venue, beer) pair and are grouped by pub name; travel rows arrive one per
//! option. Duplicate rows overwrite earlier ones (last write wins) while the
//! venue or option keeps the position of its first row.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use super::errors::CatalogError;
use super::models::{Beer, Catalog, RawRecord, TravelOption, Venue};

/// Field labels expected on raw catalog rows
pub mod fields {
    pub const PUB_NAME: &str = "pub_name";
    pub const TABLE_FEE: &str = "table_fee";
    pub const BEER_NAME: &str = "beer_name";
    pub const BEER_PRICE: &str = "beer_price";
    pub const RATING: &str = "rating";
    pub const SECONDARY_RATING: &str = "secondary_rating";
    pub const OPTION_NAME: &str = "option_name";
    pub const PRICE: &str = "price";
}

/// Build an immutable [`Catalog`] from raw venue and travel rows.
pub fn load_catalog(
    venue_records: &[RawRecord],
    travel_records: &[RawRecord],
) -> Result<Catalog, CatalogError> {
    let mut venues: Vec<Venue> = Vec::new();
    let mut venue_positions: HashMap<String, usize> = HashMap::new();

    for (row, record) in venue_records.iter().enumerate() {
        let name = text_field(record, fields::PUB_NAME)
            .ok_or(CatalogError::MissingVenueName { row })?;
        let table_fee = amount_field(record, fields::TABLE_FEE, row, &name)?;
        let rating = rating_field(record, fields::RATING, row, &name)?;
        let secondary_rating = rating_field(record, fields::SECONDARY_RATING, row, &name)?;
        let beer_name =
            text_field(record, fields::BEER_NAME).ok_or_else(|| CatalogError::MissingBeerName {
                row,
                venue: name.clone(),
            })?;
        let beer_price = amount_field(record, fields::BEER_PRICE, row, &beer_name)?;

        let position = match venue_positions.get(&name) {
            Some(&position) => position,
            None => {
                venue_positions.insert(name.clone(), venues.len());
                venues.push(Venue {
                    name,
                    table_fee,
                    rating,
                    secondary_rating,
                    beers: Vec::new(),
                });
                venues.len() - 1
            }
        };

        let venue = &mut venues[position];
        venue.table_fee = table_fee;
        venue.rating = rating;
        venue.secondary_rating = secondary_rating;

        match venue.beers.iter_mut().find(|b| b.name == beer_name) {
            Some(beer) => beer.price = beer_price,
            None => venue.beers.push(Beer {
                name: beer_name,
                price: beer_price,
            }),
        }
    }

    let mut travel_options: Vec<TravelOption> = Vec::new();

    for (row, record) in travel_records.iter().enumerate() {
        let name = text_field(record, fields::OPTION_NAME)
            .ok_or(CatalogError::MissingTravelName { row })?;
        let price = amount_field(record, fields::PRICE, row, &name)?;

        match travel_options.iter_mut().find(|t| t.name == name) {
            Some(option) => option.price = price,
            None => travel_options.push(TravelOption { name, price }),
        }
    }

    tracing::debug!(
        venues = venues.len(),
        travel_options = travel_options.len(),
        "Catalog loaded"
    );

    Ok(Catalog::from_parts(venues, travel_options))
}

/// Parse a non-negative currency amount from a spreadsheet value.
///
/// Accepts JSON numbers and numeric strings. Strings may carry a leading
/// currency symbol and thousands separators, e.g. `"₹1,250"`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use plannabe_web::pricing::parse_amount;
///
/// assert_eq!(parse_amount(&serde_json::json!("₹1,250")), Some(dec!(1250)));
/// assert_eq!(parse_amount(&serde_json::json!(99.5)), Some(dec!(99.5)));
/// assert_eq!(parse_amount(&serde_json::json!(-1)), None);
/// ```
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(n) => decimal_from_str(&n.to_string())?,
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches(['₹', '$'])
                .chars()
                .filter(|c| *c != ',')
                .collect();
            decimal_from_str(cleaned.trim())?
        }
        _ => return None,
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    Some(amount)
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

/// Trimmed text value; blank and non-scalar values count as missing.
fn text_field(record: &RawRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn amount_field(
    record: &RawRecord,
    field: &'static str,
    row: usize,
    key: &str,
) -> Result<Decimal, CatalogError> {
    let value = record.get(field).unwrap_or(&Value::Null);
    parse_amount(value).ok_or_else(|| CatalogError::InvalidAmount {
        row,
        key: key.to_string(),
        field,
        value: display_value(value),
    })
}

fn rating_field(
    record: &RawRecord,
    field: &'static str,
    row: usize,
    key: &str,
) -> Result<Option<f64>, CatalogError> {
    let invalid = |value: &Value| CatalogError::InvalidRating {
        row,
        key: key.to_string(),
        field,
        value: display_value(value),
    };

    let Some(value) = record.get(field) else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| invalid(value)),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(rating) if rating.is_finite() => Ok(Some(rating)),
            _ => Err(invalid(value)),
        },
        _ => Err(invalid(value)),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
