//! Sync status service for tracking last successful sync times
//!
//! Lets a restarted process skip a job whose last successful run is still
//! within its minimum interval.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::entities::sync_status::{self, Entity as SyncStatus};

/// Job names for tracking sync status
pub mod jobs {
    pub const PRICE_BACKFILL: &str = "price_backfill_sync";
}

/// Default minimum intervals between syncs (in seconds)
pub mod intervals {
    pub const PRICE_BACKFILL: i32 = 86400; // 24 hours, the series is daily
}

pub async fn get_status(
    db: &DatabaseConnection,
    job_name: &str,
) -> Result<Option<sync_status::Model>, DbErr> {
    SyncStatus::find()
        .filter(sync_status::Column::JobName.eq(job_name))
        .one(db)
        .await
}

/// Check if a sync job should run based on last successful sync time
///
/// Returns true if:
/// - No record exists for this job (first run)
/// - Last successful sync was at least `min_interval_secs` ago
///
/// The caller's interval wins over the stored one, which only reflects
/// whoever recorded the last run.
pub async fn should_sync(
    db: &DatabaseConnection,
    job_name: &str,
    min_interval_secs: i32,
) -> Result<bool, DbErr> {
    let Some(record) = get_status(db, job_name).await? else {
        tracing::info!("[{}] First run detected, will sync", job_name);
        return Ok(true);
    };

    let Some(last_success) = record.last_success_at else {
        tracing::info!("[{}] No previous successful sync, will sync", job_name);
        return Ok(true);
    };

    let elapsed = Utc::now().naive_utc().signed_duration_since(last_success);
    let interval = Duration::seconds(min_interval_secs as i64);

    if elapsed >= interval {
        tracing::info!(
            "[{}] Last sync was {}s ago (min: {}s), will sync",
            job_name,
            elapsed.num_seconds(),
            min_interval_secs
        );
        Ok(true)
    } else {
        tracing::info!(
            "[{}] Skipping sync - last sync was {}s ago, next sync in {}s",
            job_name,
            elapsed.num_seconds(),
            (interval - elapsed).num_seconds()
        );
        Ok(false)
    }
}

/// Record a successful sync
pub async fn record_success(
    db: &DatabaseConnection,
    job_name: &str,
    default_interval_secs: i32,
) -> Result<(), DbErr> {
    let now = Utc::now().naive_utc();

    match get_status(db, job_name).await? {
        Some(record) => {
            let success_count = record.success_count + 1;
            let mut active_model: sync_status::ActiveModel = record.into();
            active_model.last_success_at = Set(Some(now));
            active_model.last_attempt_at = Set(Some(now));
            active_model.last_error = Set(None);
            active_model.success_count = Set(success_count);
            active_model.min_interval_secs = Set(default_interval_secs);
            active_model.update(db).await?;
        }
        None => {
            let new_record = sync_status::ActiveModel {
                job_name: Set(job_name.to_string()),
                last_success_at: Set(Some(now)),
                last_attempt_at: Set(Some(now)),
                last_error: Set(None),
                success_count: Set(1),
                error_count: Set(0),
                min_interval_secs: Set(default_interval_secs),
                ..Default::default()
            };
            new_record.insert(db).await?;
        }
    }

    tracing::debug!("[{}] Recorded successful sync", job_name);
    Ok(())
}

/// Record a failed sync attempt
pub async fn record_failure(
    db: &DatabaseConnection,
    job_name: &str,
    error: &str,
    default_interval_secs: i32,
) -> Result<(), DbErr> {
    let now = Utc::now().naive_utc();

    match get_status(db, job_name).await? {
        Some(record) => {
            let error_count = record.error_count + 1;
            let mut active_model: sync_status::ActiveModel = record.into();
            active_model.last_attempt_at = Set(Some(now));
            active_model.last_error = Set(Some(error.to_string()));
            active_model.error_count = Set(error_count);
            active_model.min_interval_secs = Set(default_interval_secs);
            active_model.update(db).await?;
        }
        None => {
            let new_record = sync_status::ActiveModel {
                job_name: Set(job_name.to_string()),
                last_success_at: Set(None),
                last_attempt_at: Set(Some(now)),
                last_error: Set(Some(error.to_string())),
                success_count: Set(0),
                error_count: Set(1),
                min_interval_secs: Set(default_interval_secs),
                ..Default::default()
            };
            new_record.insert(db).await?;
        }
    }

    tracing::debug!("[{}] Recorded failed sync: {}", job_name, error);
    Ok(())
}
