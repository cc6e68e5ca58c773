//! Wire types for the Anthropic Messages API (non-streaming).

use serde::{Deserialize, Serialize};

/// Default maximum output tokens per completion.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Request body for `POST /v1/messages`.
#[derive(Clone, Debug, Serialize)]
pub struct AnthropicRequest {
    /// Model identifier.
    pub model: String,
    /// Maximum output tokens.
    pub max_tokens: u32,
    /// Sampling temperature; low for deterministic-leaning reporting.
    pub temperature: f32,
    /// System prompt.
    pub system: String,
    /// Conversation turns; always a single user turn here.
    pub messages: Vec<MessageParam>,
}

/// One conversation turn.
#[derive(Clone, Debug, Serialize)]
pub struct MessageParam {
    /// Turn role (`user`).
    pub role: String,
    /// Plain-text content.
    pub content: String,
}

/// Response body for a non-streaming message.
#[derive(Clone, Debug, Deserialize)]
pub struct AnthropicResponse {
    /// Content blocks of the reply.
    pub content: Vec<ContentBlock>,
}

/// One content block of a reply.
#[derive(Clone, Debug, Deserialize)]
pub struct ContentBlock {
    /// Block type (`text`, `thinking`, ...).
    #[serde(rename = "type")]
    pub block_type: String,
    /// Text payload for `text` blocks.
    #[serde(default)]
    pub text: String,
}
