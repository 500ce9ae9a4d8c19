//! Core LLM client trait and test double.

use crate::error::{RedlineError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Stateless prompt-completion gateway. Each call is independent; the review
/// workflow defines no retry or streaming contract on top of this.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt, get the full completion text back.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Scripted client for tests: returns canned responses in order and records
/// every prompt it was given.
pub struct MockLlmClient {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

impl MockLlmClient {
    /// Client that answers every prompt with the given responses, in order.
    /// The last response repeats once the script runs out.
    pub fn with_responses(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            prompts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Client that fails every call with an upstream error.
    pub fn failing() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self.fail {
            return Err(RedlineError::Upstream("mock failure".to_string()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(RedlineError::Upstream("mock script exhausted".to_string()));
        }
        if responses.len() == 1 {
            Ok(responses[0].clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

/// Placeholder used when no gateway is configured (e.g. the API key env var
/// is unset). Store-only operations still work; any call that actually needs
/// the gateway fails upstream with the recorded reason.
pub struct UnavailableClient {
    reason: String,
}

impl UnavailableClient {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl LlmClient for UnavailableClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(RedlineError::Upstream(self.reason.clone()))
    }

    fn model(&self) -> &str {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_client_fails_with_reason() {
        let client = UnavailableClient::new("REDLINE_API_KEY not set".to_string());
        let err = client.complete("x").await.unwrap_err();
        assert!(err.to_string().contains("REDLINE_API_KEY not set"));
    }

    #[tokio::test]
    async fn test_mock_returns_scripted_responses_in_order() {
        let mock = MockLlmClient::with_responses(vec!["first", "second"]);
        assert_eq!(mock.complete("a").await.unwrap(), "first");
        assert_eq!(mock.complete("b").await.unwrap(), "second");
        // Last response repeats
        assert_eq!(mock.complete("c").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let mock = MockLlmClient::with_responses(vec!["ok"]);
        mock.complete("one").await.unwrap();
        mock.complete("two").await.unwrap();
        assert_eq!(mock.recorded_prompts(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockLlmClient::failing();
        let err = mock.complete("x").await.unwrap_err();
        assert!(matches!(err, RedlineError::Upstream(_)));
    }
}
