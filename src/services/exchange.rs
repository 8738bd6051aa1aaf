use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, Order, QueryFilter, QueryOrder};

use crate::entities::{exchange_logs, exchanges, prelude::*};

/// Exchange by its public ticker, `None` when nothing matches
pub async fn find_exchange_by_ticker(
    db: &DatabaseConnection,
    ticker: &str,
) -> Result<Option<exchanges::Model>, DbErr> {
    Exchanges::find()
        .filter(exchanges::Column::Ticker.eq(ticker))
        .one(db)
        .await
}

/// Daily logs of the exchange called `name`, in insertion order.
///
/// `None` when no exchange has that name, an empty vec when it has no logs.
pub async fn find_daily_logs_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<Vec<exchange_logs::Model>>, DbErr> {
    let Some(exchange) = Exchanges::find()
        .filter(exchanges::Column::Name.eq(name))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let logs = exchange
        .find_related(ExchangeLogs)
        .order_by(exchange_logs::Column::Id, Order::Asc)
        .all(db)
        .await?;

    Ok(Some(logs))
}
