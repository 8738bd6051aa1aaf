use std::env;

use thiserror::Error;

use crate::services::coinapi::{DEFAULT_COINAPI_BASE_URL, LOOKS_SYMBOL_ID};
use crate::services::coinmarketcap::DEFAULT_COINMARKETCAP_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, read from the environment (and `.env` if present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub port: u16,
    pub coinapi_key: Option<String>,
    pub coinapi_base_url: String,
    pub coinapi_symbol_id: String,
    pub price_sync_interval_secs: u64,
    pub coinmarketcap_api_key: Option<String>,
    pub coinmarketcap_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset and blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL"),
            port: parse_or(var("PORT"), "PORT", 4000)?,
            coinapi_key: var("COINAPI_KEY"),
            coinapi_base_url: var("COINAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COINAPI_BASE_URL.to_string()),
            coinapi_symbol_id: var("COINAPI_SYMBOL_ID")
                .unwrap_or_else(|| LOOKS_SYMBOL_ID.to_string()),
            price_sync_interval_secs: parse_or(
                var("PRICE_SYNC_INTERVAL_SECS"),
                "PRICE_SYNC_INTERVAL_SECS",
                86400, // 24 hours
            )?,
            coinmarketcap_api_key: var("COINMARKETCAP_API_KEY"),
            coinmarketcap_base_url: var("COINMARKETCAP_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COINMARKETCAP_BASE_URL.to_string()),
        })
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn require_coinapi_key(&self) -> Result<&str, ConfigError> {
        self.coinapi_key
            .as_deref()
            .ok_or(ConfigError::Missing("COINAPI_KEY"))
    }

    pub fn require_coinmarketcap_key(&self) -> Result<&str, ConfigError> {
        self.coinmarketcap_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("COINMARKETCAP_API_KEY"))
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
