//! Database queries for the pricing engine.
//!
//! Catalog tables mirror the planner spreadsheet tabs. Rows are read back as
//! JSON objects keyed by the catalog field labels so that
//! [`load_catalog`](super::catalog::load_catalog) stays the only place that
//! interprets them.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::{AppError, Result};

use super::models::{Booking, RawRecord};

/// Fetch one raw record per (venue, beer) row, in sheet order
pub async fn fetch_venue_records(pool: &PgPool) -> Result<Vec<RawRecord>> {
    let rows = sqlx::query_scalar::<_, Json<RawRecord>>(
        r#"
        SELECT json_build_object(
            'pub_name', pub_name,
            'table_fee', table_fee::text,
            'beer_name', beer_name,
            'beer_price', beer_price::text,
            'rating', rating::text,
            'secondary_rating', secondary_rating::text
        )
        FROM pubs_data
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|Json(record)| record).collect())
}

/// Fetch one raw record per travel option row, in sheet order
pub async fn fetch_travel_records(pool: &PgPool) -> Result<Vec<RawRecord>> {
    let rows = sqlx::query_scalar::<_, Json<RawRecord>>(
        r#"
        SELECT json_build_object(
            'option_name', option_name,
            'price', price::text
        )
        FROM travel_data
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|Json(record)| record).collect())
}

/// Append a booking row
pub async fn insert_booking(pool: &PgPool, booking: &Booking) -> Result<()> {
    let party_size = i32::try_from(booking.party_size)
        .map_err(|_| AppError::Internal(format!("Party size {} out of range", booking.party_size)))?;

    sqlx::query(
        r#"
        INSERT INTO bookings (
            id, party_size, chosen_venues, chosen_beers,
            travel_choice, reservation_opt_out, total_cost, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(booking.id)
    .bind(party_size)
    .bind(Json(&booking.chosen_venues))
    .bind(Json(&booking.chosen_beers))
    .bind(&booking.travel_choice)
    .bind(booking.reservation_opt_out)
    .bind(booking.total_cost)
    .bind(booking.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
