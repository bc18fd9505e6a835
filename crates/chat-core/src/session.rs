//! Session Bookkeeping
//!
//! One dispatch session per process run. Nothing here is persisted; the
//! summary exists for logging and for callers that want to inspect a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Classifier replied with the exit sentinel
    ExitReply,
    /// User typed the exit sentinel
    ExitInput,
    /// Input stream closed
    EndOfInput,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::ExitReply => write!(f, "exit reply"),
            EndReason::ExitInput => write!(f, "exit input"),
            EndReason::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Counters for a finished (or running) session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,

    /// Classifier round trips
    pub classifier_calls: usize,

    /// Directives executed
    pub directives: usize,

    /// Prose replies shown to the user
    pub prompts: usize,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub end_reason: Option<EndReason>,
}

impl SessionSummary {
    pub fn start() -> Self {
        Self {
            id: SessionId::new(),
            classifier_calls: 0,
            directives: 0,
            prompts: 0,
            started_at: Utc::now(),
            ended_at: None,
            end_reason: None,
        }
    }

    pub fn finish(&mut self, reason: EndReason) {
        self.ended_at = Some(Utc::now());
        self.end_reason = Some(reason);
    }

    /// Duration of the session so far
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at.unwrap_or_else(Utc::now) - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut summary = SessionSummary::start();
        assert!(summary.end_reason.is_none());

        summary.finish(EndReason::ExitInput);
        assert_eq!(summary.end_reason, Some(EndReason::ExitInput));
        assert!(summary.duration() >= chrono::Duration::zero());
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
