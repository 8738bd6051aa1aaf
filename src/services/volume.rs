use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QuerySelect,
};
use thiserror::Error;

use crate::entities::{exchange_logs, prelude::*};
use crate::models::volume::VolumeByMonth;

/// Volumes are denominated in ETH
pub const VOLUME_CURRENCY: &str = "ETH";

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("month {month} of year {year} is out of range")]
    InvalidMonth { year: i32, month: i32 },
    #[error("monthly volume exceeds the decimal range")]
    Overflow,
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct VolumeRow {
    pub date: DateTime<Utc>,
    pub daily_volume: Decimal,
    pub daily_volume_excluding_zero_fee: Option<Decimal>,
}

/// UTC midnight on the first day of a zero-based `month`.
///
/// Months outside 0..=11 roll into neighbouring years (12 is January of
/// `year + 1`, -1 is December of `year - 1`).
pub fn month_start(year: i32, month: i32) -> Option<DateTime<Utc>> {
    let year = year.checked_add(month.div_euclid(12))?;
    let month = month.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}

/// `[start, end)` bounds of a calendar month
pub fn month_window(year: i32, month: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), VolumeError> {
    let invalid = || VolumeError::InvalidMonth { year, month };

    let start = month_start(year, month).ok_or_else(invalid)?;
    let next = month.checked_add(1).ok_or_else(invalid)?;
    let end = month_start(year, next).ok_or_else(invalid)?;

    Ok((start, end))
}

/// Sum the month's daily volumes. Floors are applied to the totals only.
pub fn summarize(rows: &[VolumeRow]) -> Result<VolumeByMonth, VolumeError> {
    let mut all = Decimal::ZERO;
    let mut excluding_zero_fee = Decimal::ZERO;

    for row in rows {
        all = all
            .checked_add(row.daily_volume)
            .ok_or(VolumeError::Overflow)?;
        // unknown counts as zero
        excluding_zero_fee = excluding_zero_fee
            .checked_add(row.daily_volume_excluding_zero_fee.unwrap_or(Decimal::ZERO))
            .ok_or(VolumeError::Overflow)?;
    }

    Ok(VolumeByMonth {
        currency: VOLUME_CURRENCY.to_string(),
        all_volume: all.floor().to_f64().unwrap_or_default(),
        volume_excluding_zero_fee: excluding_zero_fee.floor().to_f64().unwrap_or_default(),
    })
}

pub async fn monthly_volume(
    db: &DatabaseConnection,
    year: i32,
    month: i32,
) -> Result<VolumeByMonth, VolumeError> {
    let (start, end) = month_window(year, month)?;

    let rows = ExchangeLogs::find()
        .select_only()
        .column(exchange_logs::Column::Date)
        .column(exchange_logs::Column::DailyVolume)
        .column(exchange_logs::Column::DailyVolumeExcludingZeroFee)
        .filter(exchange_logs::Column::Date.gte(start))
        .filter(exchange_logs::Column::Date.lt(end))
        .into_model::<VolumeRow>()
        .all(db)
        .await?;

    tracing::debug!(
        "Aggregating {} exchange logs between {} and {}",
        rows.len(),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    summarize(&rows)
}
