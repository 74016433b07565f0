//! Docfields Extractor
//!
//! Pulls `name`, `age`, `city` and `major` out of free-form text, and splits
//! long documents into overlapping chunks.
//!
//! # Architecture
//!
//! ```text
//! Text → ExtractionOrchestrator → CompletionService → JSON → ExtractionResult (ai)
//!                 │ on any failure
//!                 └────────────→ RuleExtractor → ExtractionResult (fallback)
//!
//! Text → ChunkAssembler → TextChunker → [TextChunk]
//! ```
//!
//! # Key Features
//!
//! - **Rule-based extraction**: whitespace tokens and four fixed heuristics,
//!   each worth 0.25 confidence
//! - **AI extraction**: strict-JSON prompting through an injected
//!   `CompletionService`
//! - **Fallback**: every AI failure degrades to the rule result
//! - **Chunking**: fixed-size character windows with overlap
//!
//! # Example Usage
//!
//! ```no_run
//! use docfields_extractor::{ExtractionOrchestrator, ExtractorConfig, ChunkAssembler};
//! use docfields_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let llm = Arc::new(MockProvider::new(r#"{"name":"Dan","age":22}"#));
//! let extractor = ExtractionOrchestrator::new(llm, ExtractorConfig::default());
//!
//! let result = extractor.extract_with_ai("Dan is 22").await;
//! println!("{:?} from {}", result.fields, result.source);
//!
//! let chunks = ChunkAssembler::default().assemble("long document text", "doc1");
//! println!("{} chunks", chunks.len());
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod rules;


pub use chunking::{
    chunk_text, ChunkAssembler, ChunkPreview, TextChunker, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE,
};
pub use config::{ExtractorConfig, DEFAULT_AI_CONFIDENCE};
pub use error::{AiFailure, ExtractorError};
pub use extractor::ExtractionOrchestrator;
pub use parser::parse_ai_fields;
pub use prompt::{PromptBuilder, FIELDS, SYSTEM_INSTRUCTION};
pub use rules::{tokenize, RuleExtractor};
