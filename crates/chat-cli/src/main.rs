//! ticker-chat
//!
//! Interactive terminal session: free text goes to the dialogue service,
//! directives it sends back are answered from the exchange's market data.

mod config;
mod console;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_core::{DispatchLoop, IntentClassifier};
use chat_runtime::WatsonAssistant;
use market_data::{MarketActionTable, MarketData, MarketDataClient};

use crate::config::AppConfig;
use crate::console::StdConsole;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;

    // Market data
    let market = Arc::new(MarketDataClient::from_config(&config.market)?);

    if market.ping().await {
        tracing::info!("✓ Connected to {} at {}", market.name(), config.market.base_url);
    } else {
        tracing::warn!("⚠ {} not reachable at {}", market.name(), config.market.base_url);
    }

    // Intent classifier
    let classifier = Arc::new(WatsonAssistant::from_config(config.assistant.clone())?);

    match classifier.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to {}", classifier.name()),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} not available - session will fail", classifier.name());
            tracing::warn!("  Check ASSISTANT_URL, ASSISTANT_WORKSPACE_ID and ASSISTANT_API_KEY");
        }
    }

    let dispatcher = DispatchLoop::builder()
        .classifier(classifier)
        .actions(MarketActionTable::new(market))
        .greeting(config.greeting.clone())
        .exit_token(config.exit_token.clone())
        .build()?;

    let mut console = StdConsole::new();

    match dispatcher.run(&mut console).await {
        Ok(summary) => {
            tracing::info!(
                session = %summary.id,
                directives = summary.directives,
                duration_ms = summary.duration().num_milliseconds(),
                "goodbye"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("session aborted: {}", e);
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}
