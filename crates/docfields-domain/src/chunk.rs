//! Chunk module - identified windows over a document's text

use serde::{Deserialize, Serialize};

/// A fixed-size window over one document's text
///
/// Chunks of a document are numbered `0..N-1` in document order. They carry
/// no reference back to the source beyond `doc_id` and `chunk_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Owning document (e.g. an uploaded file name)
    pub doc_id: String,

    /// Zero-based position within the document
    pub chunk_id: usize,

    /// The window's text
    pub text: String,
}

impl TextChunk {
    /// Create a new chunk
    pub fn new(doc_id: impl Into<String>, chunk_id: usize, text: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            chunk_id,
            text: text.into(),
        }
    }

    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
