//! Anthropic completion client.
//!
//! Single-attempt, non-streaming `POST /v1/messages`. There is no retry, no
//! backoff, and no timeout override: a transient failure surfaces
//! immediately to the caller.

use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::CompletionError;
use crate::types::{
    AnthropicRequest, AnthropicResponse, DEFAULT_MAX_OUTPUT_TOKENS, MessageParam,
};

/// API version header value.
const API_VERSION: &str = "2023-06-01";

/// Sampling temperature for status-report synthesis.
const TEMPERATURE: f32 = 0.2;

/// System prompt framing every completion.
const SYSTEM_PROMPT: &str = "You are a program management reporting agent.";

/// Configuration for [`AnthropicClient`].
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    /// API key sent in the `x-api-key` header.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Base URL (overridden by tests to point at a mock server).
    pub base_url: String,
}

/// Anthropic Messages API client.
pub struct AnthropicClient {
    config: AnthropicConfig,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a client with its own HTTP connection pool.
    #[must_use]
    pub fn new(config: AnthropicConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a client with a shared HTTP connection pool.
    #[must_use]
    pub fn with_client(config: AnthropicConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_headers(&self) -> Result<HeaderMap, CompletionError> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.config.api_key).map_err(|_| CompletionError::Api {
                status: 0,
                message: "API key is not a valid header value".to_string(),
            })?,
        );
        let _ = headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }

    /// Send `prompt` as a single user turn and return the reply text.
    ///
    /// Non-success statuses fail with [`CompletionError::Api`] carrying the
    /// message extracted from the API error body.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![MessageParam {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url);
        debug!(
            model = %request.model,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_api_error(&body, status.as_u16());
            error!(status = status.as_u16(), %message, "completion API error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: AnthropicResponse = response.json().await?;
        let text: String = reply
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(CompletionError::NoText);
        }
        Ok(text)
    }
}

/// Extract a human-readable message from an API error body.
fn parse_api_error(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    format!("HTTP {status}: {body}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: String) -> AnthropicClient {
        AnthropicClient::new(AnthropicConfig {
            api_key: "sk-test-key".into(),
            model: "claude-sonnet-4-5-20250929".into(),
            base_url,
        })
    }

    fn text_reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn"
        })
    }

    #[tokio::test]
    async fn complete_returns_reply_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("{\"ok\":true}")))
            .mount(&server)
            .await;

        let text = client(server.uri()).complete("prompt").await.unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn complete_sends_expected_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test-key"))
            .and(header("anthropic-version", API_VERSION))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-5-20250929",
                "temperature": 0.2,
                "messages": [{"role": "user", "content": "the prompt"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let _ = client(server.uri()).complete("the prompt").await.unwrap();
    }

    #[tokio::test]
    async fn complete_concatenates_text_blocks_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [
                    {"type": "thinking", "thinking": "hmm"},
                    {"type": "text", "text": "part one "},
                    {"type": "text", "text": "part two"}
                ]
            })))
            .mount(&server)
            .await;

        let text = client(server.uri()).complete("p").await.unwrap();
        assert_eq!(text, "part one part two");
    }

    #[tokio::test]
    async fn api_error_carries_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"type": "invalid_request_error", "message": "Bad request"}
            })))
            .mount(&server)
            .await;

        let err = client(server.uri()).complete("p").await.unwrap_err();
        match err {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Bad request");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(server.uri()).complete("p").await.unwrap_err();
        match err {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("502"));
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn reply_without_text_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": []
            })))
            .mount(&server)
            .await;

        assert!(matches!(
            client(server.uri()).complete("p").await.unwrap_err(),
            CompletionError::NoText
        ));
    }
}
