//! In-memory caching using moka
//!
//! Holds the current catalog snapshot so quotes don't hit the database on
//! every selection change. A failed refresh leaves the previous snapshot in
//! place until its TTL runs out.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::error::Result;
use crate::pricing::services;
use crate::pricing::sources::CatalogSource;
use crate::pricing::Catalog;

const CATALOG_KEY: &str = "catalog";

/// Application cache holding the catalog snapshot
#[derive(Clone)]
pub struct AppCache {
    /// Catalog snapshot (single entry)
    pub catalog: Cache<String, Arc<Catalog>>,
}

impl AppCache {
    /// Create a new cache instance with the given catalog TTL
    pub fn new(catalog_ttl: Duration) -> Self {
        Self {
            catalog: Cache::builder()
                .max_capacity(1)
                .time_to_live(catalog_ttl)
                .build(),
        }
    }

    /// Serve the cached catalog, loading it from `source` on a miss
    pub async fn catalog_or_load(&self, source: &dyn CatalogSource) -> Result<Arc<Catalog>> {
        if let Some(cached) = self.catalog.get(CATALOG_KEY).await {
            tracing::debug!("Cache HIT for catalog");
            return Ok(cached);
        }

        tracing::debug!("Cache MISS for catalog");
        self.refresh_catalog(source).await
    }

    /// Load a fresh catalog from `source` and replace the cached one
    pub async fn refresh_catalog(&self, source: &dyn CatalogSource) -> Result<Arc<Catalog>> {
        let catalog = Arc::new(services::fetch_catalog(source).await?);
        self.catalog
            .insert(CATALOG_KEY.to_string(), catalog.clone())
            .await;
        Ok(catalog)
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            catalog_cached: self.catalog.contains_key(CATALOG_KEY),
        }
    }

    /// Drop the catalog snapshot
    pub async fn invalidate_catalog(&self) {
        self.catalog.invalidate(CATALOG_KEY).await;
        info!("Catalog cache invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub catalog_cached: bool,
}

/// Start background catalog warmer
///
/// Loads the catalog on startup and reloads it every `every`.
pub async fn start_catalog_warmer(cache: AppCache, source: Arc<dyn CatalogSource>, every: Duration) {
    let mut interval = interval(every);
    loop {
        interval.tick().await;
        match cache.refresh_catalog(source.as_ref()).await {
            Ok(catalog) => info!(
                venues = catalog.venues().len(),
                travel_options = catalog.travel_options().len(),
                "Catalog warm-up complete"
            ),
            Err(e) => warn!("Failed to warm catalog cache: {}", e),
        }
    }
}
