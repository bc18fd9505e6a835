//! # market-data
//!
//! Read-only cryptocurrency market data, and the chat actions that expose it.
//!
//! ## Flow
//!
//! ```text
//! "getLatestPrice:BTCUSDT"
//!         │  MarketActionTable::resolve
//!         ▼
//! MarketAction::LatestPrice("BTCUSDT")
//!         │  MarketData::get_latest_price
//!         ▼
//! ┌──────────────────────┐  listed?  ┌────────────────────────────────┐
//! │ cached symbol catalog│──── yes ─▶│ GET /api/v3/ticker/price?symbol│
//! └──────────────────────┘           └────────────────────────────────┘
//!         │ no                                  │
//!         ▼                                     ▼
//!       "none"                        "BTCUSDT: 97500.12"
//! ```
//!
//! The catalog (`exchangeInfo`) is fetched at most once per client unless
//! explicitly refreshed with [`MarketData::get_exchange_info`].

pub mod actions;
pub mod config;
pub mod error;
pub mod exchange;
pub mod model;

pub use actions::{MarketAction, MarketActionTable, MarketOutput};
pub use config::MarketDataConfig;
pub use error::{MarketDataError, Result};
pub use exchange::{HttpTransport, MarketData, MarketDataClient, MockTransport, ReqwestTransport};
pub use model::{BookTicker, ExchangeInfo, OrderBook, PriceLevel, PriceTicker, RateLimit, SymbolInfo, Ticker24h, Trade};
