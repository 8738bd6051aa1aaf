use chrono::{DateTime, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, Set};

use exchange_volume_backend::entities::{exchange_logs, exchanges};

/// Fresh in-memory SQLite database with all migrations applied.
///
/// A single pooled connection keeps every query on the same memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

#[allow(dead_code)]
pub fn utc_day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

#[allow(dead_code)]
pub async fn seed_exchange(
    db: &DatabaseConnection,
    name: &str,
    ticker: &str,
) -> Result<exchanges::Model, DbErr> {
    exchanges::ActiveModel {
        name: Set(name.to_string()),
        ticker: Set(ticker.to_string()),
        token_address: Set("0xf4d2888d29d722226fafa5d9b24f9164c092421e".to_string()),
        token_cap: Set(dec!(1000000000)),
        token_supply: Set(dec!(523000000)),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[allow(dead_code)]
pub async fn seed_log(
    db: &DatabaseConnection,
    exchange_id: i32,
    date: DateTime<Utc>,
    daily_volume: Decimal,
    daily_volume_excluding_zero_fee: Option<Decimal>,
) -> Result<exchange_logs::Model, DbErr> {
    exchange_logs::ActiveModel {
        date: Set(date),
        daily_volume: Set(daily_volume),
        daily_volume_excluding_zero_fee: Set(daily_volume_excluding_zero_fee),
        exchange_id: Set(exchange_id),
        price_high: Set(None),
        price_low: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database should migrate cleanly");
    }
}
