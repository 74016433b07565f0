//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// Trait for text completion services (LLM chat APIs)
///
/// Implemented by the infrastructure layer (docfields-llm). Implementations
/// are constructed explicitly and injected into whatever needs them.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Error type for completion operations
    type Error: std::fmt::Display + Send;

    /// Produce a single completion for a system instruction and a user prompt
    async fn complete(
        &self,
        system_instruction: &str,
        user_prompt: &str,
    ) -> Result<String, Self::Error>;

    /// Human-readable model identifier, used in logs
    fn model_name(&self) -> &str {
        "llm"
    }
}
