//! Binance Market-Data Client
//!
//! Unauthenticated, read-only routes of the Binance spot REST API. The symbol
//! catalog (`exchangeInfo`) is fetched lazily on first need and cached for the
//! lifetime of the client; symbol arguments are validated against it locally
//! before any request is made.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::transport::{HttpTransport, ReqwestTransport};
use super::MarketData;
use crate::config::MarketDataConfig;
use crate::error::{MarketDataError, Result};
use crate::model::{BookTicker, ExchangeInfo, OrderBook, PriceTicker, RateLimit, Ticker24h, Trade};

pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 100;
pub const DEFAULT_TRADES_LIMIT: u32 = 500;

pub(crate) mod routes {
    pub const PING: &str = "/api/v1/ping";
    pub const EXCHANGE_INFO: &str = "/api/v1/exchangeInfo";
    pub const DEPTH: &str = "/api/v1/depth";
    pub const TRADES: &str = "/api/v1/trades";
    pub const HISTORICAL_TRADES: &str = "/api/v1/historicalTrades";
    pub const TICKER_24H: &str = "/api/v1/ticker/24hr";
    pub const TICKER_PRICE: &str = "/api/v3/ticker/price";
    pub const BOOK_TICKER: &str = "/api/v3/ticker/bookTicker";
}

/// Market-data client over any [`HttpTransport`]
pub struct MarketDataClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    catalog: Mutex<Option<Arc<ExchangeInfo>>>,
}

impl MarketDataClient<ReqwestTransport> {
    pub fn from_config(config: &MarketDataConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.base_url, config.timeout())?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: HttpTransport> MarketDataClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            catalog: Mutex::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The cached catalog, fetching it first if this client has none yet.
    ///
    /// The lock is held across the fetch so concurrent callers never load it
    /// twice.
    pub async fn ensure_loaded(&self) -> Result<Arc<ExchangeInfo>> {
        let mut catalog = self.catalog.lock().await;

        if let Some(info) = catalog.as_ref() {
            return Ok(Arc::clone(info));
        }

        let info = Arc::new(self.fetch::<ExchangeInfo>(routes::EXCHANGE_INFO, &[]).await?);
        debug!(symbols = info.symbols.len(), "symbol catalog loaded");
        *catalog = Some(Arc::clone(&info));

        Ok(info)
    }

    async fn is_listed(&self, symbol: &str) -> Result<bool> {
        let listed = self.ensure_loaded().await?.contains_symbol(symbol);
        if !listed {
            debug!(symbol, "symbol not in catalog");
        }
        Ok(listed)
    }

    async fn fetch<R: DeserializeOwned>(&self, route: &str, query: &[(&str, String)]) -> Result<R> {
        let response = self.transport.get(route, query).await?;

        if !response.is_success() {
            return Err(MarketDataError::Status {
                route: route.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch `route` only if `symbol` is listed
    async fn fetch_listed<R: DeserializeOwned>(
        &self,
        symbol: &str,
        route: &str,
        query: &[(&str, String)],
    ) -> Result<Option<R>> {
        if !self.is_listed(symbol).await? {
            return Ok(None);
        }

        self.fetch(route, query).await.map(Some)
    }
}

#[async_trait]
impl<T: HttpTransport> MarketData for MarketDataClient<T> {
    fn name(&self) -> &str {
        "Binance"
    }

    async fn ping(&self) -> bool {
        match self.transport.get(routes::PING, &[]).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                warn!(status = response.status, "exchange ping failed");
                false
            }
            Err(e) => {
                warn!("exchange ping failed: {}", e);
                false
            }
        }
    }

    async fn get_exchange_info(&self) -> Result<Arc<ExchangeInfo>> {
        let mut catalog = self.catalog.lock().await;

        let info = Arc::new(self.fetch::<ExchangeInfo>(routes::EXCHANGE_INFO, &[]).await?);
        *catalog = Some(Arc::clone(&info));

        Ok(info)
    }

    async fn get_rate_limits(&self) -> Result<Vec<RateLimit>> {
        Ok(self.ensure_loaded().await?.rate_limits.clone())
    }

    async fn get_order_book(&self, symbol: &str, limit: u32) -> Result<Option<OrderBook>> {
        let query = [("symbol", symbol.to_string()), ("limit", limit.to_string())];
        self.fetch_listed(symbol, routes::DEPTH, &query).await
    }

    async fn get_recent_trades(&self, symbol: &str, limit: u32) -> Result<Option<Vec<Trade>>> {
        let query = [("symbol", symbol.to_string()), ("limit", limit.to_string())];
        self.fetch_listed(symbol, routes::TRADES, &query).await
    }

    async fn get_old_trades(
        &self,
        symbol: &str,
        limit: u32,
        from_id: Option<u64>,
    ) -> Result<Option<Vec<Trade>>> {
        let mut query = vec![("symbol", symbol.to_string()), ("limit", limit.to_string())];
        if let Some(from_id) = from_id {
            query.push(("fromId", from_id.to_string()));
        }
        self.fetch_listed(symbol, routes::HISTORICAL_TRADES, &query).await
    }

    async fn get_24h_ticker(&self, symbol: &str) -> Result<Option<Ticker24h>> {
        self.fetch_listed(symbol, routes::TICKER_24H, &[("symbol", symbol.to_string())])
            .await
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<Option<PriceTicker>> {
        self.fetch_listed(symbol, routes::TICKER_PRICE, &[("symbol", symbol.to_string())])
            .await
    }

    async fn get_best_order_book(&self, symbol: &str) -> Result<Option<BookTicker>> {
        self.fetch_listed(symbol, routes::BOOK_TICKER, &[("symbol", symbol.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::MockTransport;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn catalog() -> serde_json::Value {
        json!({
            "timezone": "UTC",
            "rateLimits": [
                {"rateLimitType": "REQUEST_WEIGHT", "interval": "MINUTE", "intervalNum": 1, "limit": 1200},
                {"rateLimitType": "RAW_REQUESTS", "interval": "MINUTE", "intervalNum": 5, "limit": 6100}
            ],
            "symbols": [{"symbol": "BTCUSDT"}, {"symbol": "ETHBTC"}]
        })
    }

    fn client(transport: MockTransport) -> MarketDataClient<MockTransport> {
        MarketDataClient::with_transport(transport.with_json(routes::EXCHANGE_INFO, &catalog()))
    }

    #[tokio::test]
    async fn test_latest_price_end_to_end() {
        let client = client(
            MockTransport::new()
                .with_json(routes::TICKER_PRICE, &json!({"symbol": "BTCUSDT", "price": "97500.12000000"})),
        );

        let ticker = client.get_latest_price("BTCUSDT").await.unwrap().unwrap();
        assert_eq!(ticker.symbol, "BTCUSDT");
        assert_eq!(ticker.price, dec!(97500.12));

        let requests = client.transport().requests();
        let last = requests.last().unwrap();
        assert_eq!(last.route, "/api/v3/ticker/price");
        assert_eq!(last.query, vec![("symbol".to_string(), "BTCUSDT".to_string())]);

        assert!(client.get_latest_price("FOOBAR").await.unwrap().is_none());
        assert_eq!(client.transport().count(routes::TICKER_PRICE), 1);
    }

    #[tokio::test]
    async fn test_unknown_symbol_issues_no_request() {
        let client = client(MockTransport::new());

        assert!(client.get_order_book("FOOBAR", DEFAULT_ORDER_BOOK_LIMIT).await.unwrap().is_none());
        assert!(client.get_recent_trades("FOOBAR", DEFAULT_TRADES_LIMIT).await.unwrap().is_none());
        assert!(client.get_old_trades("FOOBAR", DEFAULT_TRADES_LIMIT, Some(7)).await.unwrap().is_none());
        assert!(client.get_24h_ticker("FOOBAR").await.unwrap().is_none());
        assert!(client.get_latest_price("FOOBAR").await.unwrap().is_none());
        assert!(client.get_best_order_book("FOOBAR").await.unwrap().is_none());

        // Only the catalog itself was fetched
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].route, routes::EXCHANGE_INFO);
    }

    #[tokio::test]
    async fn test_catalog_fetched_once() {
        let client = client(
            MockTransport::new()
                .with_json(routes::TICKER_PRICE, &json!({"symbol": "ETHBTC", "price": "0.03512"}))
                .with_json(routes::TRADES, &json!([])),
        );

        client.get_latest_price("ETHBTC").await.unwrap();
        client.get_recent_trades("ETHBTC", 10).await.unwrap();
        client.get_rate_limits().await.unwrap();
        client.get_latest_price("NOPE").await.unwrap();

        assert_eq!(client.transport().count(routes::EXCHANGE_INFO), 1);
    }

    #[tokio::test]
    async fn test_exchange_info_replaces_catalog() {
        let client = client(MockTransport::new());

        client.get_rate_limits().await.unwrap();
        let info = client.get_exchange_info().await.unwrap();
        assert_eq!(info.symbols.len(), 2);
        client.get_latest_price("NOPE").await.unwrap();

        assert_eq!(client.transport().count(routes::EXCHANGE_INFO), 2);
    }

    #[tokio::test]
    async fn test_query_parameters_are_verbatim() {
        let book = json!({"lastUpdateId": 1, "bids": [["1.0", "2.0"]], "asks": [["1.1", "3.0"]]});
        let client = client(
            MockTransport::new()
                .with_json(routes::DEPTH, &book)
                .with_json(routes::HISTORICAL_TRADES, &json!([])),
        );

        client.get_order_book("ETHBTC", 5).await.unwrap().unwrap();
        client.get_old_trades("ETHBTC", 50, Some(28457)).await.unwrap().unwrap();
        client.get_old_trades("ETHBTC", 50, None).await.unwrap().unwrap();

        let requests = client.transport().requests();
        let depth = &requests[1];
        assert_eq!(depth.route, routes::DEPTH);
        assert_eq!(depth.param("symbol"), Some("ETHBTC"));
        assert_eq!(depth.param("limit"), Some("5"));

        assert_eq!(requests[2].param("fromId"), Some("28457"));
        assert_eq!(requests[2].param("limit"), Some("50"));
        assert_eq!(requests[3].param("fromId"), None);
    }

    #[tokio::test]
    async fn test_recent_trades_for_listed_symbol() {
        let trades = json!([
            {"id": 28457, "price": "4.00000100", "qty": "12.00000000", "quoteQty": "48.000012",
             "time": 1499865549590_i64, "isBuyerMaker": true, "isBestMatch": true}
        ]);
        let client = client(MockTransport::new().with_json(routes::TRADES, &trades));

        let trades = client.get_recent_trades("BTCUSDT", 25).await.unwrap().unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, 28457);

        let requests = client.transport().requests();
        assert_eq!(client.transport().count(routes::TRADES), 1);
        let last = requests.last().unwrap();
        assert_eq!(last.route, routes::TRADES);
        assert_eq!(last.param("symbol"), Some("BTCUSDT"));
        assert_eq!(last.param("limit"), Some("25"));
    }

    #[tokio::test]
    async fn test_24h_ticker_for_listed_symbol() {
        let ticker = json!({
            "symbol": "ETHBTC", "priceChange": "0.00010000", "priceChangePercent": "0.285",
            "weightedAvgPrice": "0.03510000", "lastPrice": "0.03520000", "openPrice": "0.03510000",
            "highPrice": "0.03550000", "lowPrice": "0.03490000", "volume": "1200.5",
            "quoteVolume": "42.1", "openTime": 1499783499040_i64, "closeTime": 1499869899040_i64,
            "firstId": 100, "lastId": 180, "count": 81
        });
        let client = client(MockTransport::new().with_json(routes::TICKER_24H, &ticker));

        let ticker = client.get_24h_ticker("ETHBTC").await.unwrap().unwrap();
        assert_eq!(ticker.last_price, dec!(0.0352));
        assert_eq!(ticker.count, Some(81));

        let requests = client.transport().requests();
        assert_eq!(client.transport().count(routes::TICKER_24H), 1);
        let last = requests.last().unwrap();
        assert_eq!(last.route, routes::TICKER_24H);
        assert_eq!(last.query, vec![("symbol".to_string(), "ETHBTC".to_string())]);
    }

    #[tokio::test]
    async fn test_best_order_book_for_listed_symbol() {
        let book = json!({
            "symbol": "BTCUSDT", "bidPrice": "97500.10", "bidQty": "0.5",
            "askPrice": "97500.20", "askQty": "1.25"
        });
        let client = client(MockTransport::new().with_json(routes::BOOK_TICKER, &book));

        let book = client.get_best_order_book("BTCUSDT").await.unwrap().unwrap();
        assert_eq!(book.spread(), dec!(0.10));

        let requests = client.transport().requests();
        assert_eq!(client.transport().count(routes::BOOK_TICKER), 1);
        let last = requests.last().unwrap();
        assert_eq!(last.route, routes::BOOK_TICKER);
        assert_eq!(last.query, vec![("symbol".to_string(), "BTCUSDT".to_string())]);
    }

    #[tokio::test]
    async fn test_rate_limits_from_catalog() {
        let client = client(MockTransport::new());

        let limits = client.get_rate_limits().await.unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0].rate_limit_type, "REQUEST_WEIGHT");
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_an_error() {
        let client = MarketDataClient::with_transport(
            MockTransport::new().with_json(routes::EXCHANGE_INFO, &json!({"symbols": []})),
        );

        let result = client.get_rate_limits().await;
        assert!(matches!(result, Err(MarketDataError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let client = client(
            MockTransport::new().with_response(routes::BOOK_TICKER, 503, "Service Unavailable"),
        );

        let result = client.get_best_order_book("BTCUSDT").await;
        assert!(matches!(result, Err(MarketDataError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_ping() {
        let up = MarketDataClient::with_transport(MockTransport::new().with_json(routes::PING, &json!({})));
        assert!(up.ping().await);

        let down = MarketDataClient::with_transport(MockTransport::new().with_response(routes::PING, 500, ""));
        assert!(!down.ping().await);

        let unreachable = MarketDataClient::with_transport(MockTransport::unreachable());
        assert!(!unreachable.ping().await);
    }
}
