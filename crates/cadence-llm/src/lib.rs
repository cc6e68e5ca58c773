//! # cadence-llm
//!
//! The completion side of the Cadence engine:
//!
//! - [`client::AnthropicClient`]: non-streaming, single-attempt Messages
//!   API client
//! - [`composer`]: deterministic prompt building, fenced-reply parsing, and
//!   notes fetching with local failure recovery

#![deny(unsafe_code)]

pub mod client;
pub mod composer;
pub mod errors;
pub mod types;

pub use client::{AnthropicClient, AnthropicConfig};
pub use composer::{build_prompt, fetch_notes, parse_reply};
pub use errors::{CompletionError, ComposeError};
