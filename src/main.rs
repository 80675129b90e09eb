use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plannabe_web::cache::{start_catalog_warmer, AppCache};
use plannabe_web::config::Config;
use plannabe_web::pricing::{BookingSink, CatalogSource, PgBookingSink, PgCatalogSource};
use plannabe_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("plannabe_web=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = AppCache::new(config.catalog_ttl);
    let catalog_source: Arc<dyn CatalogSource> = Arc::new(PgCatalogSource::new(pool.clone()));
    let booking_sink: Arc<dyn BookingSink> = Arc::new(PgBookingSink::new(pool));

    tokio::spawn(start_catalog_warmer(
        cache.clone(),
        catalog_source.clone(),
        config.catalog_refresh,
    ));

    let state = AppState {
        cache,
        catalog_source,
        booking_sink,
        currency: config.currency.clone(),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app(state)).await?;

    Ok(())
}
