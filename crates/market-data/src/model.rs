//! Domain Models
//!
//! One record per market-data route, decoded from the exchange's JSON.
//! Prices and quantities arrive as strings and are held as `Decimal`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Exchange metadata: the symbol catalog plus request limits
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    #[serde(default)]
    pub timezone: Option<String>,

    /// Server time in epoch milliseconds
    #[serde(default)]
    pub server_time: Option<i64>,

    pub rate_limits: Vec<RateLimit>,

    /// Tradable instruments, in exchange order
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.symbol(symbol).is_some()
    }
}

/// A request limit advertised by the exchange
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// e.g. `REQUEST_WEIGHT`, `ORDERS`, `RAW_REQUESTS`
    pub rate_limit_type: String,

    /// e.g. `SECOND`, `MINUTE`, `DAY`
    pub interval: String,

    #[serde(default)]
    pub interval_num: Option<u32>,

    pub limit: u64,
}

/// One tradable instrument
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Trading pair code (e.g., "BTCUSDT")
    pub symbol: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub base_asset: Option<String>,

    #[serde(default)]
    pub quote_asset: Option<String>,

    /// Remaining exchange-specific metadata
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// `[price, quantity]` level of an order book
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel(pub Decimal, pub Decimal);

impl PriceLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn quantity(&self) -> Decimal {
        self.1
    }
}

/// Order book snapshot (depth)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub last_update_id: u64,

    /// Best (highest) bid first
    pub bids: Vec<PriceLevel>,

    /// Best (lowest) ask first
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.first().copied()
    }

    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price() - self.best_bid()?.price())
    }
}

/// A public trade
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub price: Decimal,
    pub qty: Decimal,

    #[serde(default)]
    pub quote_qty: Option<Decimal>,

    /// Trade time in epoch milliseconds
    pub time: i64,

    pub is_buyer_maker: bool,

    #[serde(default)]
    pub is_best_match: Option<bool>,
}

impl Trade {
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// Taker side as seen by the market
    pub fn side(&self) -> &'static str {
        if self.is_buyer_maker { "SELL" } else { "BUY" }
    }
}

/// 24-hour rolling window statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Decimal,

    #[serde(default)]
    pub prev_close_price: Option<Decimal>,

    pub last_price: Decimal,

    #[serde(default)]
    pub last_qty: Option<Decimal>,

    #[serde(default)]
    pub bid_price: Option<Decimal>,

    #[serde(default)]
    pub ask_price: Option<Decimal>,

    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,

    /// First and last trade ids in the window (-1 when there were none)
    #[serde(default)]
    pub first_id: Option<i64>,
    #[serde(default)]
    pub last_id: Option<i64>,

    /// Number of trades in the window
    #[serde(default)]
    pub count: Option<u64>,
}

impl Ticker24h {
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.close_time)
    }
}

/// Latest price for a symbol
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTicker {
    pub symbol: String,
    pub price: Decimal,
}

/// Best bid/ask on the order book
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    pub symbol: String,
    pub bid_price: Decimal,
    pub bid_qty: Decimal,
    pub ask_price: Decimal,
    pub ask_qty: Decimal,
}

impl BookTicker {
    pub fn spread(&self) -> Decimal {
        self.ask_price - self.bid_price
    }
}
