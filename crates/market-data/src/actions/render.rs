//! Rendering of action results for the chat console.

use std::fmt;

use crate::model::{BookTicker, OrderBook, PriceTicker, Ticker24h, Trade};

/// Order book levels shown per side
const BOOK_DEPTH_SHOWN: usize = 5;

/// Most recent trades shown
const TRADES_SHOWN: usize = 10;

/// Result of a market action
#[derive(Clone, Debug)]
pub enum MarketOutput {
    /// Symbol is not listed on the exchange
    NotFound { symbol: String },
    Price(PriceTicker),
    Ticker(Ticker24h),
    Book { symbol: String, book: OrderBook },
    Trades { symbol: String, trades: Vec<Trade> },
    BestBook(BookTicker),
}

impl MarketOutput {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for MarketOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { symbol } => write!(f, "none (no listed symbol {})", symbol),
            Self::Price(ticker) => write!(f, "{}: {}", ticker.symbol, ticker.price.normalize()),
            Self::Ticker(ticker) => render_ticker(f, ticker),
            Self::Book { symbol, book } => render_book(f, symbol, book),
            Self::Trades { symbol, trades } => render_trades(f, symbol, trades),
            Self::BestBook(ticker) => write!(
                f,
                "{} best bid {} x {}, best ask {} x {} (spread {})",
                ticker.symbol,
                ticker.bid_price.normalize(),
                ticker.bid_qty.normalize(),
                ticker.ask_price.normalize(),
                ticker.ask_qty.normalize(),
                ticker.spread().normalize()
            ),
        }
    }
}

fn render_ticker(f: &mut fmt::Formatter<'_>, ticker: &Ticker24h) -> fmt::Result {
    writeln!(
        f,
        "{} last {} ({:+}% 24h)",
        ticker.symbol,
        ticker.last_price.normalize(),
        ticker.price_change_percent.normalize()
    )?;
    writeln!(
        f,
        "  open {}  high {}  low {}  avg {}",
        ticker.open_price.normalize(),
        ticker.high_price.normalize(),
        ticker.low_price.normalize(),
        ticker.weighted_avg_price.normalize()
    )?;
    write!(
        f,
        "  volume {} (quote {})",
        ticker.volume.normalize(),
        ticker.quote_volume.normalize()
    )?;
    if let Some(count) = ticker.count {
        write!(f, " over {} trades", count)?;
    }
    Ok(())
}

fn render_book(f: &mut fmt::Formatter<'_>, symbol: &str, book: &OrderBook) -> fmt::Result {
    write!(f, "{} order book (update {})", symbol, book.last_update_id)?;
    if let Some(spread) = book.spread() {
        write!(f, ", spread {}", spread.normalize())?;
    }

    for (label, levels) in [("asks", &book.asks), ("bids", &book.bids)] {
        write!(f, "\n  {}:", label)?;
        if levels.is_empty() {
            write!(f, " empty")?;
        }
        for level in levels.iter().take(BOOK_DEPTH_SHOWN) {
            write!(f, "\n    {} x {}", level.price().normalize(), level.quantity().normalize())?;
        }
    }
    Ok(())
}

fn render_trades(f: &mut fmt::Formatter<'_>, symbol: &str, trades: &[Trade]) -> fmt::Result {
    write!(f, "{}: {} trades", symbol, trades.len())?;

    let skip = trades.len().saturating_sub(TRADES_SHOWN);
    for trade in trades.iter().skip(skip) {
        let when = trade
            .executed_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| trade.time.to_string());
        write!(
            f,
            "\n  #{} {} {} {} @ {}",
            trade.id,
            when,
            trade.side(),
            trade.qty.normalize(),
            trade.price.normalize()
        )?;
    }
    Ok(())
}
