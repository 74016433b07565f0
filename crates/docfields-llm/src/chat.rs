//! OpenAI-compatible chat completions provider
//!
//! Talks to any endpoint that implements `POST {base_url}/chat/completions`,
//! DeepSeek being the default.
//!
//! # Features
//!
//! - Async HTTP communication with bearer-token auth
//! - Configurable endpoint, model and request timeout
//! - Optional JSON mode (`response_format: {"type": "json_object"}`)
//!
//! # Examples
//!
//! ```no_run
//! use docfields_llm::ChatCompletionsProvider;
//!
//! let provider = ChatCompletionsProvider::new(
//!     "https://api.deepseek.com",
//!     "deepseek-chat",
//!     "sk-...",
//! )
//! .unwrap()
//! .with_json_mode(true);
//! ```

use crate::LlmError;
use async_trait::async_trait;
use docfields_domain::CompletionService;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default model
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default timeout for completion requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat completions client
pub struct ChatCompletionsProvider {
    base_url: String,
    model: String,
    api_key: String,
    json_mode: bool,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionsProvider {
    /// Create a new provider with the default request timeout
    ///
    /// # Errors
    ///
    /// Returns `LlmError::NotConfigured` if the API key is empty or the HTTP
    /// client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, model, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new provider with an explicit request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured("API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            json_mode: false,
            client,
        })
    }

    /// Ask the provider for a JSON object response
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    /// Full URL of the completions endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, system_instruction: &'a str, user_prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: self.json_mode.then_some(ResponseFormat { kind: "json_object" }),
            stream: false,
        }
    }
}

/// Pull `choices[0].message.content` out of a response body
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message.content".to_string()))
}

#[async_trait]
impl CompletionService for ChatCompletionsProvider {
    type Error = LlmError;

    async fn complete(
        &self,
        system_instruction: &str,
        user_prompt: &str,
    ) -> Result<String, Self::Error> {
        let url = self.endpoint();
        let request_body = self.build_request(system_instruction, user_prompt);

        debug!("Chat completion request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
