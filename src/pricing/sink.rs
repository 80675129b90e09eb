//! Where finalized bookings go.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

use super::models::Booking;
use super::queries;

/// Append-only store for finalized bookings
#[async_trait]
pub trait BookingSink: Send + Sync {
    /// Append one booking. No ordering is promised between bookings.
    async fn append(&self, booking: &Booking) -> Result<()>;
}

/// Appends to the `bookings` table
#[derive(Debug, Clone)]
pub struct PgBookingSink {
    pool: PgPool,
}

impl PgBookingSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingSink for PgBookingSink {
    async fn append(&self, booking: &Booking) -> Result<()> {
        queries::insert_booking(&self.pool, booking).await?;
        tracing::info!(booking_id = %booking.id, total_cost = %booking.total_cost, "Booking stored");
        Ok(())
    }
}

/// In-memory implementation of BookingSink (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingSink {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryBookingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far
    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }
}

#[async_trait]
impl BookingSink for InMemoryBookingSink {
    async fn append(&self, booking: &Booking) -> Result<()> {
        self.bookings.write().await.push(booking.clone());
        tracing::info!(booking_id = %booking.id, "Booking stored in memory");
        Ok(())
    }
}
