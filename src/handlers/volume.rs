use async_graphql::{Context, Object};
use chrono::{Datelike, Utc};
use sea_orm::DatabaseConnection;

use crate::models::volume::VolumeByMonth;
use crate::services::volume::monthly_volume;

#[derive(Default)]
pub struct VolumeQuery;

#[Object]
impl VolumeQuery {
    /// Total volume for a calendar month. `month` is zero-based; both
    /// arguments default to the current UTC month.
    async fn volume(
        &self,
        ctx: &Context<'_>,
        month: Option<i32>,
        year: Option<i32>,
    ) -> async_graphql::Result<VolumeByMonth> {
        let db = ctx.data::<DatabaseConnection>()?;

        let now = Utc::now();
        let month = month.unwrap_or(now.month0() as i32);
        let year = year.unwrap_or(now.year());

        Ok(monthly_volume(db, year, month).await?)
    }
}
