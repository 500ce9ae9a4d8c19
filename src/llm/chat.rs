//! Chat completions client.
//!
//! Implements the LlmClient trait against an OpenAI-compatible
//! `/api/chat/completions` endpoint (Open WebUI, vLLM, and friends speak this).
//! Every transport, status, and response-shape failure collapses to one
//! upstream error kind.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::LlmConfig;
use crate::error::{RedlineError, Result};
use crate::llm::client::LlmClient;

/// Client for an OpenAI-compatible chat completions API.
pub struct ChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Create a client from config, reading the bearer token from the
    /// environment variable the config names.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| RedlineError::Upstream(format!("{} not set", config.api_key_env)))?;
        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: String, config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RedlineError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Build the request body for the chat completions API.
    fn build_request(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }]
        })
    }

    /// Pull the completion text out of the API response.
    fn parse_response(&self, body: Value) -> Result<String> {
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                RedlineError::Upstream("response missing choices[0].message.content".to_string())
            })
    }

    async fn send_request(&self, body: Value) -> Result<Value> {
        let url = format!("{}/api/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RedlineError::Upstream(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RedlineError::Upstream(format!(
                "API error {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RedlineError::Upstream(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LlmClient for ChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        log::debug!("LLM call: model={} prompt_chars={}", self.model, prompt.len());
        let body = self.build_request(prompt);
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}
