use async_graphql::{ComplexObject, Context, Object};
use sea_orm::DatabaseConnection;

use crate::models::exchange::{Exchange, ExchangeLog};
use crate::services::exchange::{find_daily_logs_by_name, find_exchange_by_ticker};

#[derive(Default)]
pub struct ExchangeQuery;

#[Object]
impl ExchangeQuery {
    /// Look up an exchange by its ticker; null when unknown
    async fn exchange(
        &self,
        ctx: &Context<'_>,
        ticker: String,
    ) -> async_graphql::Result<Option<Exchange>> {
        let db = ctx.data::<DatabaseConnection>()?;

        let exchange = find_exchange_by_ticker(db, &ticker).await?;

        if exchange.is_none() {
            tracing::debug!("No exchange with ticker {}", ticker);
        }

        Ok(exchange.map(Exchange::from))
    }
}

#[ComplexObject]
impl Exchange {
    /// Every daily log of this exchange, oldest insert first
    async fn daily_logs(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<ExchangeLog>>> {
        let db = ctx.data::<DatabaseConnection>()?;

        let logs = find_daily_logs_by_name(db, &self.name).await?;

        Ok(logs.map(|logs| logs.into_iter().map(ExchangeLog::from).collect()))
    }
}
