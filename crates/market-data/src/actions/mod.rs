//! Market Actions
//!
//! The fixed set of directives the classifier can emit, each resolving to
//! one market-data operation on a single symbol.

mod render;

pub use render::MarketOutput;

use std::sync::Arc;

use async_trait::async_trait;
use chat_core::{ActionTable, ChatError, Directive, Result as ChatResult};
use tracing::info;

use crate::error::Result;
use crate::exchange::{MarketData, DEFAULT_ORDER_BOOK_LIMIT, DEFAULT_TRADES_LIMIT};

/// A resolved directive, holding its symbol
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarketAction {
    LatestPrice(String),
    Ticker24h(String),
    OrderBook(String),
    RecentTrades(String),
    OldTrades(String),
    BestOrderBook(String),
}

impl MarketAction {
    /// Directive names, as the classifier emits them
    pub const NAMES: [&'static str; 6] = [
        "getLatestPrice",
        "get24HourTicker",
        "getOrderBook",
        "getRecentTrades",
        "getOldTrades",
        "getBestOrderBookForSymbol",
    ];

    pub fn from_directive(name: &str, symbol: &str) -> Option<Self> {
        let symbol = symbol.to_string();
        let action = match name {
            "getLatestPrice" => Self::LatestPrice(symbol),
            "get24HourTicker" => Self::Ticker24h(symbol),
            "getOrderBook" => Self::OrderBook(symbol),
            "getRecentTrades" => Self::RecentTrades(symbol),
            "getOldTrades" => Self::OldTrades(symbol),
            "getBestOrderBookForSymbol" => Self::BestOrderBook(symbol),
            _ => return None,
        };
        Some(action)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LatestPrice(_) => "getLatestPrice",
            Self::Ticker24h(_) => "get24HourTicker",
            Self::OrderBook(_) => "getOrderBook",
            Self::RecentTrades(_) => "getRecentTrades",
            Self::OldTrades(_) => "getOldTrades",
            Self::BestOrderBook(_) => "getBestOrderBookForSymbol",
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::LatestPrice(s)
            | Self::Ticker24h(s)
            | Self::OrderBook(s)
            | Self::RecentTrades(s)
            | Self::OldTrades(s)
            | Self::BestOrderBook(s) => s,
        }
    }

    /// Run against `market`; an unlisted symbol yields [`MarketOutput::NotFound`]
    pub async fn execute(&self, market: &dyn MarketData) -> Result<MarketOutput> {
        let symbol = self.symbol();

        let output = match self {
            Self::LatestPrice(_) => market.get_latest_price(symbol).await?.map(MarketOutput::Price),
            Self::Ticker24h(_) => market.get_24h_ticker(symbol).await?.map(MarketOutput::Ticker),
            Self::OrderBook(_) => market
                .get_order_book(symbol, DEFAULT_ORDER_BOOK_LIMIT)
                .await?
                .map(|book| MarketOutput::Book { symbol: symbol.to_string(), book }),
            Self::RecentTrades(_) => market
                .get_recent_trades(symbol, DEFAULT_TRADES_LIMIT)
                .await?
                .map(|trades| MarketOutput::Trades { symbol: symbol.to_string(), trades }),
            Self::OldTrades(_) => market
                .get_old_trades(symbol, DEFAULT_TRADES_LIMIT, None)
                .await?
                .map(|trades| MarketOutput::Trades { symbol: symbol.to_string(), trades }),
            Self::BestOrderBook(_) => market.get_best_order_book(symbol).await?.map(MarketOutput::BestBook),
        };

        Ok(output.unwrap_or_else(|| MarketOutput::NotFound { symbol: symbol.to_string() }))
    }
}

/// Action table backed by a market-data source
#[derive(Clone)]
pub struct MarketActionTable {
    market: Arc<dyn MarketData>,
}

impl MarketActionTable {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl ActionTable for MarketActionTable {
    type Action = MarketAction;

    fn names(&self) -> Vec<&'static str> {
        MarketAction::NAMES.to_vec()
    }

    fn resolve(&self, directive: &Directive<'_>) -> Option<MarketAction> {
        MarketAction::from_directive(directive.name, directive.argument)
    }

    async fn invoke(&self, action: &MarketAction) -> ChatResult<String> {
        let output = action
            .execute(self.market.as_ref())
            .await
            .map_err(|e| ChatError::Action(format!("{}: {}", action.name(), e)))?;

        info!(
            action = action.name(),
            symbol = action.symbol(),
            found = !output.is_not_found(),
            exchange = self.market.name(),
            "directive executed"
        );

        Ok(output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::{MarketDataClient, MockTransport};
    use serde_json::json;

    fn table(transport: MockTransport) -> (MarketActionTable, Arc<MarketDataClient<MockTransport>>) {
        let transport = transport.with_json(
            "/api/v1/exchangeInfo",
            &json!({"rateLimits": [], "symbols": [{"symbol": "BTCUSDT"}]}),
        );
        let client = Arc::new(MarketDataClient::with_transport(transport));
        (MarketActionTable::new(client.clone()), client)
    }

    #[test]
    fn test_resolve_known_names() {
        let (table, _) = table(MockTransport::new());

        for name in MarketAction::NAMES {
            let action = table.resolve(&Directive { name, argument: "BTCUSDT" }).unwrap();
            assert_eq!(action.name(), name);
            assert_eq!(action.symbol(), "BTCUSDT");
        }

        assert!(table.resolve(&Directive { name: "getPortfolio", argument: "BTCUSDT" }).is_none());
        assert!(table.resolve(&Directive { name: "getlatestprice", argument: "BTCUSDT" }).is_none());
    }

    #[tokio::test]
    async fn test_invoke_latest_price() {
        let (table, client) = table(
            MockTransport::new()
                .with_json("/api/v3/ticker/price", &json!({"symbol": "BTCUSDT", "price": "97500.00"})),
        );

        let output = table.invoke(&MarketAction::LatestPrice("BTCUSDT".into())).await.unwrap();
        assert!(output.contains("BTCUSDT"));
        assert!(output.contains("97500"));
        assert_eq!(client.transport().count("/api/v3/ticker/price"), 1);
    }

    #[tokio::test]
    async fn test_invoke_unknown_symbol() {
        let (table, client) = table(MockTransport::new());

        let output = table.invoke(&MarketAction::OrderBook("FOOBAR".into())).await.unwrap();
        assert!(output.starts_with("none"));
        assert_eq!(client.transport().count("/api/v1/depth"), 0);
    }

    #[tokio::test]
    async fn test_invoke_old_trades_without_from_id() {
        let (table, client) = table(MockTransport::new().with_json("/api/v1/historicalTrades", &json!([])));

        table.invoke(&MarketAction::OldTrades("BTCUSDT".into())).await.unwrap();

        let request = client.transport().requests().pop().unwrap();
        assert_eq!(request.param("limit"), Some("500"));
        assert_eq!(request.param("fromId"), None);
    }

    #[tokio::test]
    async fn test_invoke_failure_is_action_error() {
        let (table, _) = table(MockTransport::new().with_response("/api/v1/ticker/24hr", 500, "oops"));

        let result = table.invoke(&MarketAction::Ticker24h("BTCUSDT".into())).await;
        match result {
            Err(ChatError::Action(msg)) => assert!(msg.starts_with("get24HourTicker")),
            other => panic!("expected action error, got {:?}", other),
        }
    }
}
