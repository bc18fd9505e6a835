//! Market-data client configuration

use std::time::Duration;

use crate::error::{MarketDataError, Result};
use crate::exchange::BINANCE_BASE_URL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketDataConfig {
    /// Exchange REST base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE_BASE_URL.into(),
            timeout_secs: 30,
        }
    }
}

impl MarketDataConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `MARKET_DATA_URL` and `MARKET_DATA_TIMEOUT_SECS` as
    /// resolved by `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let base_url = lookup("MARKET_DATA_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs = match lookup("MARKET_DATA_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                MarketDataError::Config(format!("MARKET_DATA_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => defaults.timeout_secs,
        };

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
