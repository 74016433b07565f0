//! Error types for the Extractor

use std::time::Duration;
use thiserror::Error;

/// Errors visible to callers of the extractor crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Chunking or extractor settings violate a precondition
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons the AI extraction path did not produce fields
///
/// Never surfaces past the orchestrator; every variant leads to the
/// rule-based fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiFailure {
    /// The completion service returned an error
    #[error("completion failed: {0}")]
    Completion(String),

    /// The completion service did not answer in time
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    /// The completion was not valid JSON
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// The completion was JSON but not in the expected shape
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl From<serde_json::Error> for AiFailure {
    fn from(e: serde_json::Error) -> Self {
        AiFailure::MalformedJson(e.to_string())
    }
}
