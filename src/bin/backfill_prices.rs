use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_volume_backend::config::AppConfig;
use exchange_volume_backend::services::coinapi::CoinApiService;
use exchange_volume_backend::services::price_backfill::backfill_prices;
use exchange_volume_backend::services::sync_status::{self, intervals, jobs};

/// One-shot price backfill, bypassing the sync interval gate
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
    let api_key = config.require_coinapi_key()?.to_string();

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(config.require_database_url()?).await?;
    migration::Migrator::up(&db, None).await?;

    let coinapi = CoinApiService::new(api_key, config.coinapi_base_url.clone())
        .with_symbol_id(config.coinapi_symbol_id.clone());

    tracing::info!("🚀 Starting price backfill for {}", coinapi.symbol_id());

    match backfill_prices(&db, &coinapi).await {
        Ok(report) => {
            sync_status::record_success(&db, jobs::PRICE_BACKFILL, intervals::PRICE_BACKFILL).await?;
            tracing::info!(
                "✅ Price backfill done: {} fetched, {} updated, {} missing, {} failed",
                report.fetched,
                report.updated,
                report.missing,
                report.failed
            );
            Ok(())
        }
        Err(e) => {
            sync_status::record_failure(
                &db,
                jobs::PRICE_BACKFILL,
                &e.to_string(),
                intervals::PRICE_BACKFILL,
            )
            .await?;
            tracing::error!("❌ Price backfill failed: {}", e);
            Err(e.into())
        }
    }
}
