//! Error Types

use thiserror::Error;

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Dispatch error types
#[derive(Error, Debug)]
pub enum ChatError {
    /// Classifier returned an error
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Classifier unreachable or not responding
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Classifier reply is missing an expected field
    #[error("Malformed classifier reply: {0}")]
    MalformedReply(String),

    /// A directive's action failed
    #[error("Action failed: {0}")]
    Action(String),

    /// Reading or writing the user console failed
    #[error("Console error: {0}")]
    Console(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Classifier(msg) => format!("The assistant service encountered an error: {}", msg),
            ChatError::ClassifierUnavailable(_) => "The assistant service is currently unavailable. Please try again.".into(),
            ChatError::MalformedReply(_) => "The assistant service sent a reply that could not be understood.".into(),
            ChatError::Action(msg) => format!("Market data request failed: {}", msg),
            ChatError::Config(msg) => format!("Configuration problem: {}", msg),
            ChatError::Console(_) => "The terminal could not be read or written.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Other(err.to_string())
    }
}
