//! Docfields Domain Layer
//!
//! Value types shared by every other crate in the workspace, plus the trait
//! boundary to the external completion service.
//!
//! ## Key Concepts
//!
//! - **ExtractedFields**: the four optional fields pulled out of free text
//! - **ExtractionResult**: fields plus where they came from and how sure we are
//! - **Source**: `rule`, `ai` or `fallback`
//! - **TextChunk**: an identified window over a document's text
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations (LLM clients, HTTP) live in other crates
//! - The only dependencies are `serde` for the wire contract and
//!   `async-trait` for the completion boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod fields;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use chunk::TextChunk;
pub use fields::{round_confidence, ExtractedFields, ExtractionResult};
pub use source::Source;
pub use traits::CompletionService;
