//! Conversation Context
//!
//! The opaque token a classifier hands back on every turn, and the reply
//! that carries it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque conversation state issued by the classifier.
///
/// The loop never looks inside; it only hands the latest value back on the
/// next turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationContext(Value);

impl ConversationContext {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ConversationContext {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A single classifier reply
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierReply {
    /// Reply text (prose or `actionName:argument`)
    pub text: String,

    /// Context to send back on the next turn
    pub context: ConversationContext,
}

impl ClassifierReply {
    pub fn new(text: impl Into<String>, context: impl Into<ConversationContext>) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
        }
    }

    /// Whether the reply is the exit sentinel
    pub fn is_exit(&self, exit_token: &str) -> bool {
        self.text.trim() == exit_token
    }
}
