//! Watson Assistant Classifier
//!
//! Implementation of `IntentClassifier` for the Watson Assistant v1
//! workspace message API. The dialogue tree lives in the workspace; this
//! client only posts utterances and round-trips the returned context.

use std::time::Duration;

use async_trait::async_trait;
use chat_core::{
    error::{ChatError, Result},
    ClassifierReply, ConversationContext, IntentClassifier,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_VERSION: &str = "2018-09-20";

/// Watson Assistant configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatsonConfig {
    /// Service URL (e.g. `https://api.us-south.assistant.watson.cloud.ibm.com`)
    pub url: String,

    /// Dialogue workspace id
    pub workspace_id: String,

    /// IAM API key (sent as basic auth user `apikey`)
    pub api_key: String,

    /// API version date
    pub version: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WatsonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `ASSISTANT_*` variables as resolved by `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ChatError::Config(format!("{key} is not set")))
        };

        let timeout_secs = match lookup("ASSISTANT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ChatError::Config(format!("ASSISTANT_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => 30,
        };

        Ok(Self {
            url: required("ASSISTANT_URL")?,
            workspace_id: required("ASSISTANT_WORKSPACE_ID")?,
            api_key: required("ASSISTANT_API_KEY")?,
            version: lookup("ASSISTANT_VERSION").unwrap_or_else(|| DEFAULT_VERSION.into()),
            timeout_secs,
        })
    }

    fn workspace_url(&self) -> String {
        format!(
            "{}/v1/workspaces/{}",
            self.url.trim_end_matches('/'),
            self.workspace_id
        )
    }

    fn message_url(&self) -> String {
        format!("{}/message", self.workspace_url())
    }
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<MessageInput<'a>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a ConversationContext>,
}

#[derive(Debug, Serialize)]
struct MessageInput<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    output: Option<MessageOutput>,
    context: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MessageOutput {
    text: Option<Vec<String>>,
}

/// Watson Assistant intent classifier
pub struct WatsonAssistant {
    http: reqwest::Client,
    config: WatsonConfig,
}

impl WatsonAssistant {
    pub fn from_config(config: WatsonConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(WatsonConfig::from_env()?)
    }

    pub fn config(&self) -> &WatsonConfig {
        &self.config
    }

    fn build_request<'a>(
        text: Option<&'a str>,
        context: Option<&'a ConversationContext>,
    ) -> MessageRequest<'a> {
        MessageRequest {
            input: text.map(|text| MessageInput { text }),
            context,
        }
    }

    /// Convert a Watson response into a classifier reply
    fn convert_reply(response: MessageResponse) -> Result<ClassifierReply> {
        let lines = response
            .output
            .and_then(|output| output.text)
            .ok_or_else(|| ChatError::MalformedReply("missing output.text".into()))?;
        let context = response
            .context
            .ok_or_else(|| ChatError::MalformedReply("missing context".into()))?;

        Ok(ClassifierReply::new(lines.join("\n").trim(), context))
    }

    fn map_transport_error(err: &reqwest::Error) -> ChatError {
        if err.is_connect() || err.is_timeout() {
            ChatError::ClassifierUnavailable(err.to_string())
        } else {
            ChatError::Classifier(err.to_string())
        }
    }
}

#[async_trait]
impl IntentClassifier for WatsonAssistant {
    fn name(&self) -> &str {
        "Watson Assistant"
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self.http
            .get(self.config.workspace_url())
            .query(&[("version", self.config.version.as_str())])
            .basic_auth("apikey", Some(&self.config.api_key))
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => Ok(true),
            Ok(r) => {
                tracing::warn!("Watson health check failed: HTTP {}", r.status());
                Ok(false)
            }
            Err(e) => {
                tracing::warn!("Watson health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn send(
        &self,
        text: Option<&str>,
        context: Option<&ConversationContext>,
    ) -> Result<ClassifierReply> {
        let request = Self::build_request(text, context);

        let response = self.http
            .post(self.config.message_url())
            .query(&[("version", self.config.version.as_str())])
            .basic_auth("apikey", Some(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Classifier(format!("HTTP {}: {}", status, body)));
        }

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedReply(e.to_string()))?;

        let reply = Self::convert_reply(body)?;
        tracing::debug!(text = %reply.text, "classifier reply");

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("ASSISTANT_URL", "https://gateway.watsonplatform.net/assistant/api/"),
            ("ASSISTANT_WORKSPACE_ID", "ws-123"),
            ("ASSISTANT_API_KEY", "secret"),
        ])
    }

    #[test]
    fn test_config_from_lookup() {
        let env = env();
        let config = WatsonConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.version, "2018-09-20");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(
            config.message_url(),
            "https://gateway.watsonplatform.net/assistant/api/v1/workspaces/ws-123/message"
        );
    }

    #[test]
    fn test_config_requires_api_key() {
        let mut env = env();
        env.remove("ASSISTANT_API_KEY");

        let result = WatsonConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        match result {
            Err(ChatError::Config(msg)) => assert!(msg.contains("ASSISTANT_API_KEY")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_greeting_request_has_no_input_or_context() {
        let request = WatsonAssistant::build_request(None, None);
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }

    #[test]
    fn test_request_round_trips_context() {
        let context = ConversationContext::new(json!({"conversation_id": "c-1", "system": {"dialog_turn_counter": 2}}));
        let request = WatsonAssistant::build_request(Some("price of BTCUSDT"), Some(&context));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "input": {"text": "price of BTCUSDT"},
                "context": {"conversation_id": "c-1", "system": {"dialog_turn_counter": 2}}
            })
        );
    }

    #[test]
    fn test_convert_reply() {
        let response: MessageResponse = serde_json::from_value(json!({
            "intents": [{"intent": "price", "confidence": 0.97}],
            "output": {"text": ["getLatestPrice:BTCUSDT"]},
            "context": {"conversation_id": "c-1"}
        }))
        .unwrap();

        let reply = WatsonAssistant::convert_reply(response).unwrap();
        assert_eq!(reply.text, "getLatestPrice:BTCUSDT");
        assert_eq!(reply.context.as_value(), &json!({"conversation_id": "c-1"}));
    }

    #[test]
    fn test_convert_reply_joins_lines() {
        let response: MessageResponse = serde_json::from_value(json!({
            "output": {"text": ["Hello!", "Which coin?"]},
            "context": {}
        }))
        .unwrap();

        assert_eq!(WatsonAssistant::convert_reply(response).unwrap().text, "Hello!\nWhich coin?");
    }

    #[test]
    fn test_convert_reply_missing_output() {
        let response: MessageResponse = serde_json::from_value(json!({"context": {}})).unwrap();
        assert!(matches!(
            WatsonAssistant::convert_reply(response),
            Err(ChatError::MalformedReply(_))
        ));
    }
}
