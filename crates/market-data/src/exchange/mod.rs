//! Exchange Integration
//!
//! The market-data capability interface, the HTTP transport it runs on, and
//! the Binance-layout client implementing it.

mod binance;
mod mock;
mod transport;

pub use binance::{MarketDataClient, BINANCE_BASE_URL, DEFAULT_ORDER_BOOK_LIMIT, DEFAULT_TRADES_LIMIT};
pub use mock::{MockTransport, RecordedRequest};
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{BookTicker, ExchangeInfo, OrderBook, PriceTicker, RateLimit, Ticker24h, Trade};

/// Read-only market-data capability (Strategy pattern)
///
/// Symbol-gated operations return `Ok(None)` for symbols missing from the
/// exchange catalog; that is not an error.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Exchange name
    fn name(&self) -> &str;

    /// True iff the exchange answers its ping route with a success status
    async fn ping(&self) -> bool;

    /// Fetch exchange metadata, replacing any cached catalog
    async fn get_exchange_info(&self) -> Result<Arc<ExchangeInfo>>;

    /// Request limits from the catalog, loading it if needed
    async fn get_rate_limits(&self) -> Result<Vec<RateLimit>>;

    async fn get_order_book(&self, symbol: &str, limit: u32) -> Result<Option<OrderBook>>;

    async fn get_recent_trades(&self, symbol: &str, limit: u32) -> Result<Option<Vec<Trade>>>;

    /// Historical trades starting at `from_id`, or the most recent ones
    async fn get_old_trades(
        &self,
        symbol: &str,
        limit: u32,
        from_id: Option<u64>,
    ) -> Result<Option<Vec<Trade>>>;

    async fn get_24h_ticker(&self, symbol: &str) -> Result<Option<Ticker24h>>;

    async fn get_latest_price(&self, symbol: &str) -> Result<Option<PriceTicker>>;

    async fn get_best_order_book(&self, symbol: &str) -> Result<Option<BookTicker>>;
}
