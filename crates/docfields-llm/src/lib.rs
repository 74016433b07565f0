//! Docfields LLM Provider Layer
//!
//! Implementations of the `CompletionService` trait from `docfields-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic fake for testing
//! - `ChatCompletionsProvider`: OpenAI-compatible chat completions API
//!   (DeepSeek by default)
//!
//! # Examples
//!
//! ```
//! use docfields_llm::MockProvider;
//! use docfields_domain::CompletionService;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"name":"Dan"}"#);
//! let result = provider.complete("system", "prompt").await.unwrap();
//! assert_eq!(result, r#"{"name":"Dan"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod chat;

use async_trait::async_trait;
use docfields_domain::CompletionService;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use chat::ChatCompletionsProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider answered with a non-success status
    #[error("API error: HTTP {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider is missing required settings
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls. Replies
/// can be keyed by the exact user prompt; everything else gets the default.
///
/// # Examples
///
/// ```
/// use docfields_llm::MockProvider;
/// use docfields_domain::CompletionService;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2");
/// assert_eq!(provider.complete("sys", "prompt1").await.unwrap(), "response1");
/// assert!(provider.complete("sys", "prompt2").await.is_err());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompts: Arc<Mutex<Option<(String, String)>>>,
    delay: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider that fails every call
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Error(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompts: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given user prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific user prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Error("Mock error".to_string()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The (system instruction, user prompt) pair of the most recent call
    pub fn last_prompts(&self) -> Option<(String, String)> {
        lock(&self.last_prompts).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionService for MockProvider {
    type Error = LlmError;

    async fn complete(
        &self,
        system_instruction: &str,
        user_prompt: &str,
    ) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_prompts) =
            Some((system_instruction.to_string(), user_prompt.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = lock(&self.responses)
            .get(user_prompt)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
