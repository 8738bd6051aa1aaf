use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_volume_backend::config::AppConfig;
use exchange_volume_backend::jobs::price_backfill_sync::start_price_backfill_sync_job;
use exchange_volume_backend::services::coinapi::CoinApiService;
use exchange_volume_backend::{AppState, app_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,exchange_volume_backend=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(config.require_database_url()?).await?;

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    match config.coinapi_key.clone() {
        Some(api_key) => {
            let coinapi = CoinApiService::new(api_key, config.coinapi_base_url.clone())
                .with_symbol_id(config.coinapi_symbol_id.clone());

            tracing::info!(
                "Price backfill for {} every {}s",
                coinapi.symbol_id(),
                config.price_sync_interval_secs
            );

            start_price_backfill_sync_job(
                db.clone(),
                Arc::new(coinapi),
                config.price_sync_interval_secs,
            )
            .await;
        }
        None => tracing::warn!("COINAPI_KEY not set, price backfill sync disabled"),
    }

    let app = app_router(AppState::new(db));

    // Start server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
