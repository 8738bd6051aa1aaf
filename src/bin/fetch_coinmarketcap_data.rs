use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_volume_backend::config::AppConfig;
use exchange_volume_backend::services::coinmarketcap::{CoinMarketCapService, LOOKS_CMC_ID};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,exchange_volume_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Defaults to LooksRare when no id is given
    let id = env::args().nth(1).unwrap_or_else(|| LOOKS_CMC_ID.to_string());

    let config = AppConfig::from_env()?;
    let service = CoinMarketCapService::new(
        config.require_coinmarketcap_key()?.to_string(),
        config.coinmarketcap_base_url.clone(),
    );

    let data = service.get_coin_data(&id).await?;

    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
