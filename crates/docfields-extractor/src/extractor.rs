//! AI-backed extraction with rule-based fallback

use crate::config::ExtractorConfig;
use crate::error::AiFailure;
use crate::parser::parse_ai_fields;
use crate::prompt::{PromptBuilder, SYSTEM_INSTRUCTION};
use crate::rules::RuleExtractor;
use docfields_domain::{CompletionService, ExtractedFields, ExtractionResult, Source};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Extracts fields through a completion service, falling back to the rules
///
/// The completion service is injected at construction and shared through an
/// `Arc`, so one orchestrator can serve concurrent requests.
pub struct ExtractionOrchestrator<C: ?Sized> {
    completion: Arc<C>,
    rules: RuleExtractor,
    config: ExtractorConfig,
}

impl<C> ExtractionOrchestrator<C>
where
    C: CompletionService + ?Sized,
{
    /// Create a new orchestrator
    pub fn new(completion: Arc<C>, config: ExtractorConfig) -> Self {
        Self {
            completion,
            rules: RuleExtractor::new(),
            config,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Rule-only extraction, tagged `rule`
    pub fn extract_with_rules(&self, text: &str) -> ExtractionResult {
        self.rules.extract(text)
    }

    /// Extract fields, trying the completion service first
    ///
    /// Never fails: any problem on the AI path yields the rule-based result
    /// tagged `fallback`, with the rule-computed confidence.
    pub async fn extract_with_ai(&self, text: &str) -> ExtractionResult {
        match self.try_ai(text).await {
            Ok(fields) => {
                info!(
                    "AI extraction via {} returned {} fields",
                    self.completion.model_name(),
                    fields.present_count()
                );
                ExtractionResult::new(fields, Source::Ai, self.config.ai_confidence)
            }
            Err(failure) => {
                warn!("AI extraction failed, falling back to rules: {}", failure);
                self.rules.extract(text).with_source(Source::Fallback)
            }
        }
    }

    /// One AI attempt; no retry
    pub async fn try_ai(&self, text: &str) -> Result<ExtractedFields, AiFailure> {
        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.len());

        let limit = self.config.completion_timeout();
        let completion = timeout(limit, self.completion.complete(SYSTEM_INSTRUCTION, &prompt))
            .await
            .map_err(|_| AiFailure::Timeout(limit))?
            .map_err(|e| AiFailure::Completion(e.to_string()))?;

        debug!("Completion: {}", completion);

        parse_ai_fields(&completion)
    }
}
