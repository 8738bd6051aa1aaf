use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::services::price_backfill::{DayPrices, PriceHistorySource};

pub const DEFAULT_COINAPI_BASE_URL: &str = "https://rest.coinapi.io";

/// LOOKS/USD spot pair, the only series the backfill tracks
pub const LOOKS_SYMBOL_ID: &str = "FTX_SPOT_LOOKS_USD";

/// LOOKS inception; every run fetches the whole series from here
pub const HISTORY_TIME_START: &str = "2021-12-29T00:00:00";
pub const DAILY_PERIOD_ID: &str = "1DAY";
pub const HISTORY_LIMIT: u32 = 100_000;

#[derive(Debug, Error)]
pub enum CoinApiError {
    #[error("CoinAPI request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("CoinAPI error {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// One OHLCV bar as returned by `/v1/ohlcv/{symbol_id}/history`
#[derive(Debug, Clone, Deserialize)]
pub struct OhlcvRecord {
    pub time_period_start: DateTime<Utc>,
    pub time_period_end: DateTime<Utc>,
    pub time_open: Option<DateTime<Utc>>,
    pub time_close: Option<DateTime<Utc>>,
    pub price_open: f64,
    pub price_high: f64,
    pub price_low: f64,
    pub price_close: f64,
    pub volume_traded: f64,
    pub trades_count: u64,
}

impl From<&OhlcvRecord> for DayPrices {
    fn from(record: &OhlcvRecord) -> Self {
        Self {
            date: record.time_period_start,
            price_high: record.price_high,
            price_low: record.price_low,
        }
    }
}

#[derive(Clone)]
pub struct CoinApiService {
    client: Client,
    api_key: String,
    base_url: String,
    symbol_id: String,
}

impl CoinApiService {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            symbol_id: LOOKS_SYMBOL_ID.to_string(),
        }
    }

    pub fn with_symbol_id(mut self, symbol_id: impl Into<String>) -> Self {
        self.symbol_id = symbol_id.into();
        self
    }

    pub fn symbol_id(&self) -> &str {
        &self.symbol_id
    }

    pub async fn get_ohlcv_history(
        &self,
        symbol_id: &str,
        time_start: &str,
        period_id: &str,
        limit: u32,
    ) -> Result<Vec<OhlcvRecord>, CoinApiError> {
        tracing::info!(
            "Fetching {} OHLCV history for {} since {} from CoinAPI",
            period_id,
            symbol_id,
            time_start
        );

        let url = format!("{}/v1/ohlcv/{}/history", self.base_url, symbol_id);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("X-CoinAPI-Key", &self.api_key)
            .query(&[
                ("time_start", time_start),
                ("period_id", period_id),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(CoinApiError::Status { status, body });
        }

        let records: Vec<OhlcvRecord> = response.json().await?;

        if let (Some(first), Some(last)) = (records.first(), records.last()) {
            tracing::debug!(
                "Fetched {} bars for {} ({} .. {})",
                records.len(),
                symbol_id,
                first.time_period_start.format("%Y-%m-%d"),
                last.time_period_start.format("%Y-%m-%d")
            );
        }

        Ok(records)
    }
}

#[async_trait]
impl PriceHistorySource for CoinApiService {
    async fn fetch_day_prices(&self) -> Result<Vec<DayPrices>, CoinApiError> {
        let records = self
            .get_ohlcv_history(
                &self.symbol_id,
                HISTORY_TIME_START,
                DAILY_PERIOD_ID,
                HISTORY_LIMIT,
            )
            .await?;

        Ok(records.iter().map(DayPrices::from).collect())
    }
}
