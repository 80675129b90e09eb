//! Where catalog rows come from.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;

use super::models::RawRecord;
use super::queries;

/// Raw venue and travel rows, before grouping
#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    pub venue_records: Vec<RawRecord>,
    pub travel_records: Vec<RawRecord>,
}

/// Supplies raw catalog rows for [`load_catalog`](super::catalog::load_catalog)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_records(&self) -> Result<RawCatalog>;
}

/// Reads the `pubs_data` and `travel_data` tables
#[derive(Debug, Clone)]
pub struct PgCatalogSource {
    pool: PgPool,
}

impl PgCatalogSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSource for PgCatalogSource {
    async fn fetch_records(&self) -> Result<RawCatalog> {
        let venue_records = queries::fetch_venue_records(&self.pool).await?;
        let travel_records = queries::fetch_travel_records(&self.pool).await?;

        Ok(RawCatalog {
            venue_records,
            travel_records,
        })
    }
}

/// Fixed in-memory rows (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    records: RawCatalog,
}

impl StaticCatalogSource {
    pub fn new(venue_records: Vec<RawRecord>, travel_records: Vec<RawRecord>) -> Self {
        Self {
            records: RawCatalog {
                venue_records,
                travel_records,
            },
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_records(&self) -> Result<RawCatalog> {
        Ok(self.records.clone())
    }
}
