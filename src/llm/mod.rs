//! LLM gateway layer.
//!
//! This module provides:
//! - The `LlmClient` trait: one opaque, fallible prompt-completion call
//! - `ChatClient`: implementation against an OpenAI-compatible endpoint
//! - Prompt templates for the three review operations
//! - Parsing of the free-text rule extraction output

pub mod chat;
pub mod client;
pub mod parse;
pub mod prompts;

pub use chat::ChatClient;
pub use client::{LlmClient, MockLlmClient, UnavailableClient};
pub use parse::parse_rule_lines;
