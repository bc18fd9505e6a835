//! Intent Classifier Strategy
//!
//! Common interface for remote dialogue services. Given an utterance (or none)
//! and the context from the previous turn, a classifier returns reply text and
//! a fresh context.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_core::IntentClassifier;
//!
//! let classifier = WatsonAssistant::from_config(config)?;
//!
//! let greeting = classifier.send(None, None).await?;
//! let reply = classifier.send(Some("price of BTCUSDT"), Some(&greeting.context)).await?;
//! ```

use async_trait::async_trait;

use crate::context::{ClassifierReply, ConversationContext};
use crate::error::Result;

/// Strategy trait for intent classifiers
///
/// The dispatch loop works exclusively through this interface.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifier name, for logging
    fn name(&self) -> &str;

    /// Check if the classifier is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Send one turn.
    ///
    /// `text` is `None` for the opening turn; `context` is `None` at session
    /// start and after every directive.
    async fn send(
        &self,
        text: Option<&str>,
        context: Option<&ConversationContext>,
    ) -> Result<ClassifierReply>;
}
