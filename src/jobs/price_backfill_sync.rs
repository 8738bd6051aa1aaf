use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::time::{Duration, interval};

use crate::services::price_backfill::{BackfillReport, PriceHistorySource, backfill_prices};
use crate::services::sync_status::{self, jobs};

pub async fn start_price_backfill_sync_job(
    db: DatabaseConnection,
    source: Arc<dyn PriceHistorySource>,
    interval_secs: u64,
) {
    // Half the period, so a tick is never skipped because the previous run
    // finished a few seconds after it started
    let min_interval_secs = i32::try_from(interval_secs / 2).unwrap_or(i32::MAX);

    tokio::spawn(async move {
        // First tick completes immediately, so this also covers the startup run
        let mut interval = interval(Duration::from_secs(interval_secs.max(1)));

        loop {
            interval.tick().await;
            tracing::info!("Starting scheduled price backfill sync");

            if let Err(e) = run_price_backfill_sync(&db, source.as_ref(), min_interval_secs).await {
                tracing::error!("Failed to sync prices: {}", e);
            }
        }
    });
}

/// One gated backfill run.
///
/// Returns `Ok(None)` when the last success is still within
/// `min_interval_secs`. The outcome is written to `sync_status` either way.
pub async fn run_price_backfill_sync(
    db: &DatabaseConnection,
    source: &dyn PriceHistorySource,
    min_interval_secs: i32,
) -> Result<Option<BackfillReport>, Box<dyn std::error::Error + Send + Sync>> {
    if !sync_status::should_sync(db, jobs::PRICE_BACKFILL, min_interval_secs).await? {
        return Ok(None);
    }

    match backfill_prices(db, source).await {
        Ok(report) => {
            if !report.is_complete() {
                tracing::warn!(
                    "Price backfill left {} days without a matching log and {} failed",
                    report.missing,
                    report.failed
                );
            }

            sync_status::record_success(db, jobs::PRICE_BACKFILL, min_interval_secs).await?;
            Ok(Some(report))
        }
        Err(e) => {
            sync_status::record_failure(db, jobs::PRICE_BACKFILL, &e.to_string(), min_interval_secs)
                .await?;
            Err(e.into())
        }
    }
}
