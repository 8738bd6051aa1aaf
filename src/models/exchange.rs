use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::entities::{exchange_logs, exchanges};

#[derive(Debug, Clone, PartialEq, SimpleObject, Serialize, Deserialize)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: i32,
    pub name: String,
    pub ticker: String,
    pub token_address: String,
    pub token_cap: f64,
    pub token_supply: f64,
}

/// One calendar day of trading activity
#[derive(Debug, Clone, PartialEq, SimpleObject, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeLog {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub daily_volume: f64,
    pub daily_volume_excluding_zero_fee: Option<f64>,
    pub exchange_id: i32,
    pub price_high: Option<f64>,
    pub price_low: Option<f64>,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

impl From<exchanges::Model> for Exchange {
    fn from(model: exchanges::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            ticker: model.ticker,
            token_address: model.token_address,
            token_cap: to_f64(model.token_cap),
            token_supply: to_f64(model.token_supply),
        }
    }
}

impl From<exchange_logs::Model> for ExchangeLog {
    fn from(model: exchange_logs::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            daily_volume: to_f64(model.daily_volume),
            daily_volume_excluding_zero_fee: model.daily_volume_excluding_zero_fee.map(to_f64),
            exchange_id: model.exchange_id,
            price_high: model.price_high.map(to_f64),
            price_low: model.price_low.map(to_f64),
        }
    }
}
