//! Backfill of `price_high`/`price_low` on existing exchange logs.
//!
//! The whole remote series is materialised first; only then are the per-day
//! updates dispatched. Updates run concurrently and are awaited together, so
//! the returned report reflects every write that was attempted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use thiserror::Error;

use crate::entities::{exchange_logs, prelude::*};
use crate::services::coinapi::CoinApiError;

/// Daily price extremes for one UTC day
#[derive(Debug, Clone, PartialEq)]
pub struct DayPrices {
    pub date: DateTime<Utc>,
    pub price_high: f64,
    pub price_low: f64,
}

/// Anything that can produce the full daily price series for the tracked pair
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    async fn fetch_day_prices(&self) -> Result<Vec<DayPrices>, CoinApiError>;
}

#[derive(Debug, Error)]
pub enum BackfillError {
    #[error("price history fetch failed: {0}")]
    Fetch(#[from] CoinApiError),
}

#[derive(Debug, Error)]
pub enum DayUpdateError {
    #[error("price {0} is not representable as a decimal")]
    InvalidPrice(f64),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayOutcome {
    Updated,
    Missing,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub fetched: usize,
    pub updated: usize,
    pub missing: usize,
    pub failed: usize,
}

impl BackfillReport {
    /// True when every fetched day landed on an existing row
    pub fn is_complete(&self) -> bool {
        self.missing == 0 && self.failed == 0
    }
}

/// Fetch the price series and write it onto matching `exchange_logs` rows.
///
/// A fetch failure aborts before any write. Per-day failures (no row for
/// that date, store errors) are logged and counted, never propagated.
pub async fn backfill_prices(
    db: &DatabaseConnection,
    source: &dyn PriceHistorySource,
) -> Result<BackfillReport, BackfillError> {
    let days = source.fetch_day_prices().await?;

    tracing::info!("Applying prices for {} days to exchange logs", days.len());

    let outcomes = join_all(days.iter().map(|day| apply_day(db, day))).await;

    let mut report = BackfillReport {
        fetched: days.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        match outcome {
            DayOutcome::Updated => report.updated += 1,
            DayOutcome::Missing => report.missing += 1,
            DayOutcome::Failed => report.failed += 1,
        }
    }

    tracing::info!(
        "Price backfill settled: {} fetched, {} updated, {} missing, {} failed",
        report.fetched,
        report.updated,
        report.missing,
        report.failed
    );

    Ok(report)
}

async fn apply_day(db: &DatabaseConnection, day: &DayPrices) -> DayOutcome {
    match update_day_prices(db, day).await {
        Ok(0) => {
            tracing::warn!("No exchange log for {}, skipping", day.date.to_rfc3339());
            DayOutcome::Missing
        }
        Ok(_) => DayOutcome::Updated,
        Err(e) => {
            tracing::error!("Failed to update prices for {}: {}", day.date.to_rfc3339(), e);
            DayOutcome::Failed
        }
    }
}

/// Overwrite the price fields of the log keyed by `day.date`.
///
/// Returns the number of rows touched (0 or 1, `date` is unique).
pub async fn update_day_prices(
    db: &DatabaseConnection,
    day: &DayPrices,
) -> Result<u64, DayUpdateError> {
    let high = to_decimal(day.price_high)?;
    let low = to_decimal(day.price_low)?;

    let result = ExchangeLogs::update_many()
        .col_expr(exchange_logs::Column::PriceHigh, Expr::value(high))
        .col_expr(exchange_logs::Column::PriceLow, Expr::value(low))
        .filter(exchange_logs::Column::Date.eq(day.date))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

fn to_decimal(value: f64) -> Result<Decimal, DayUpdateError> {
    Decimal::try_from(value).map_err(|_| DayUpdateError::InvalidPrice(value))
}
