//! Configuration for the Extractor

use crate::chunking::{TextChunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Confidence reported for every successful AI extraction
pub const DEFAULT_AI_CONFIDENCE: f64 = 0.8;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Chunk size in characters
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,

    /// Fixed confidence attached to AI results
    pub ai_confidence: f64,

    /// Maximum time for a single completion call (seconds)
    pub completion_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.chunk_size <= self.chunk_overlap {
            return Err(ExtractorError::InvalidConfiguration(format!(
                "chunk_size ({}) must be greater than chunk_overlap ({})",
                self.chunk_size, self.chunk_overlap
            )));
        }
        if !(0.0..=1.0).contains(&self.ai_confidence) {
            return Err(ExtractorError::InvalidConfiguration(format!(
                "ai_confidence {} out of range [0.0, 1.0]",
                self.ai_confidence
            )));
        }
        if self.completion_timeout_secs == 0 {
            return Err(ExtractorError::InvalidConfiguration(
                "completion_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the chunker described by this configuration
    pub fn chunker(&self) -> Result<TextChunker, ExtractorError> {
        TextChunker::new(self.chunk_size, self.chunk_overlap)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            ai_confidence: DEFAULT_AI_CONFIDENCE,
            completion_timeout_secs: 60,
        }
    }
}
