//! # chat-core
//!
//! Turn-taking dispatch between a remote intent classifier and a local,
//! statically-known action table.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DispatchLoop                          │
//! │  ┌──────────────────┐  ┌──────────────┐  ┌────────────────┐  │
//! │  │ IntentClassifier │  │  Turn state  │  │  ActionTable   │  │
//! │  │    (Strategy)    │──│   machine    │──│ (enum dispatch)│  │
//! │  └──────────────────┘  └──────┬───────┘  └────────────────┘  │
//! │                               │                              │
//! │                          ┌────┴────┐                         │
//! │                          │ Console │                         │
//! │                          └─────────┘                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The classifier replies either with prose (shown to the user, who answers)
//! or with a directive of the form `actionName:argument`, which the loop
//! hands to the action table instead of showing it.

pub mod action;
pub mod classifier;
pub mod console;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod session;

pub use action::{ActionTable, Directive};
pub use classifier::IntentClassifier;
pub use console::{Console, ScriptedConsole};
pub use context::{ClassifierReply, ConversationContext};
pub use dispatch::{DispatchLoop, DispatchLoopBuilder, LoopConfig};
pub use error::{ChatError, Result};
pub use session::{EndReason, SessionId, SessionSummary};
