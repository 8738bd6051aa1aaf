use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_COINMARKETCAP_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// CoinMarketCap id of LooksRare
pub const LOOKS_CMC_ID: &str = "17081";

#[derive(Debug, Error)]
pub enum CoinMarketCapError {
    #[error("CoinMarketCap request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("CoinMarketCap error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("CoinMarketCap returned no data for id {0}")]
    NotFound(String),
}

#[derive(Debug, Deserialize)]
struct QuotesLatestResponse {
    #[serde(default)]
    data: HashMap<String, CmcAsset>,
}

#[derive(Debug, Deserialize)]
struct CmcAsset {
    id: i64,
    name: String,
    symbol: String,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    max_supply: Option<f64>,
    last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    quote: HashMap<String, CmcQuote>,
}

#[derive(Debug, Deserialize)]
struct CmcQuote {
    price: Option<f64>,
    market_cap: Option<f64>,
}

/// Flattened view of a CoinMarketCap asset with its USD quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinMarketCapData {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<CmcAsset> for CoinMarketCapData {
    fn from(asset: CmcAsset) -> Self {
        let usd = asset.quote.get("USD");

        Self {
            id: asset.id,
            name: asset.name,
            symbol: asset.symbol,
            circulating_supply: asset.circulating_supply,
            total_supply: asset.total_supply,
            max_supply: asset.max_supply,
            price_usd: usd.and_then(|q| q.price),
            market_cap_usd: usd.and_then(|q| q.market_cap),
            last_updated: asset.last_updated,
        }
    }
}

#[derive(Clone)]
pub struct CoinMarketCapService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CoinMarketCapService {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_coin_data(&self, id: &str) -> Result<CoinMarketCapData, CoinMarketCapError> {
        tracing::info!("Fetching latest quote for id {} from CoinMarketCap", id);

        let url = format!("{}/v2/cryptocurrency/quotes/latest", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .query(&[("id", id)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(CoinMarketCapError::Status { status, body });
        }

        let mut payload: QuotesLatestResponse = response.json().await?;

        let asset = payload
            .data
            .remove(id)
            .ok_or_else(|| CoinMarketCapError::NotFound(id.to_string()))?;

        Ok(asset.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quotes_latest() {
        let body = r#"{
            "status": { "error_code": 0, "error_message": null },
            "data": {
                "17081": {
                    "id": 17081,
                    "name": "LooksRare",
                    "symbol": "LOOKS",
                    "slug": "looksrare",
                    "circulating_supply": 523000000.5,
                    "total_supply": 999999999.0,
                    "max_supply": 1000000000,
                    "last_updated": "2022-03-01T12:00:00.000Z",
                    "quote": {
                        "USD": { "price": 2.31, "market_cap": 1208130001.1 }
                    }
                }
            }
        }"#;

        let mut payload: QuotesLatestResponse = serde_json::from_str(body).unwrap();
        let data = CoinMarketCapData::from(payload.data.remove(LOOKS_CMC_ID).unwrap());

        assert_eq!(data.name, "LooksRare");
        assert_eq!(data.symbol, "LOOKS");
        assert_eq!(data.price_usd, Some(2.31));
        assert_eq!(data.max_supply, Some(1_000_000_000.0));
    }

    #[test]
    fn test_missing_quote_currency() {
        let body = r#"{ "data": { "1": { "id": 1, "name": "Bitcoin", "symbol": "BTC", "quote": {} } } }"#;

        let mut payload: QuotesLatestResponse = serde_json::from_str(body).unwrap();
        let data = CoinMarketCapData::from(payload.data.remove("1").unwrap());

        assert_eq!(data.price_usd, None);
        assert_eq!(data.circulating_supply, None);
    }
}
