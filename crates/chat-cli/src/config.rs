//! Application Configuration
//!
//! Everything comes from the environment (optionally seeded from `.env`).

use anyhow::{Context, Result};
use chat_core::dispatch::DEFAULT_EXIT_TOKEN;
use chat_runtime::WatsonConfig;
use market_data::MarketDataConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub market: MarketDataConfig,
    pub assistant: WatsonConfig,

    /// Opening utterance (`CHAT_GREETING`)
    pub greeting: Option<String>,

    /// Exit sentinel (`CHAT_EXIT_TOKEN`)
    pub exit_token: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let market = MarketDataConfig::from_lookup(&lookup).context("market data settings")?;
        let assistant = WatsonConfig::from_lookup(&lookup).context("assistant settings")?;

        let greeting = lookup("CHAT_GREETING").filter(|g| !g.trim().is_empty());
        let exit_token = lookup("CHAT_EXIT_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_EXIT_TOKEN.into());

        Ok(Self {
            market,
            assistant,
            greeting,
            exit_token,
        })
    }
}
