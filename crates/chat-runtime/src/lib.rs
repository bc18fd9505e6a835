//! # chat-runtime
//!
//! Intent classifier integrations for ticker-chat.
//!
//! ## Classifiers
//!
//! - **Watson** (default): IBM Watson Assistant v1 workspace message API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_runtime::{WatsonAssistant, WatsonConfig};
//!
//! let classifier = WatsonAssistant::from_config(WatsonConfig::from_env()?)?;
//! let dispatcher = DispatchLoop::builder()
//!     .classifier(Arc::new(classifier))
//!     .actions(actions)
//!     .build()?;
//! ```

#[cfg(feature = "watson")]
pub mod watson;

#[cfg(feature = "watson")]
pub use watson::{WatsonAssistant, WatsonConfig};

// Re-export core types for convenience
pub use chat_core::{
    ChatError, ClassifierReply, ConversationContext, DispatchLoop, IntentClassifier, Result,
};
