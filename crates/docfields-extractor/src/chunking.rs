//! Fixed-size, overlapping text chunking for long documents

use crate::error::ExtractorError;
use docfields_domain::TextChunk;
use serde::Serialize;
use std::iter;

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Splits text into fixed-size windows that overlap by a fixed amount
///
/// Positions are counted in chars, so a window never cuts a multi-byte
/// character in half. Windows are not word or sentence aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `chunk_size <= overlap`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        if chunk_size <= overlap {
            return Err(ExtractorError::InvalidConfiguration(format!(
                "chunk_size ({}) must be greater than overlap ({})",
                chunk_size, overlap
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Maximum chunk length in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by consecutive chunks
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive chunks
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        // Byte offset of every char start, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        (0..char_count)
            .step_by(self.stride())
            .map(|start| {
                let end = usize::min(start.saturating_add(self.chunk_size), char_count);
                text[boundaries[start]..boundaries[end]].to_string()
            })
            .collect()
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Chunk text in one call, validating the window settings first
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, ExtractorError> {
    Ok(TextChunker::new(chunk_size, overlap)?.chunk(text))
}

/// Turns a document's text into identified chunks
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkAssembler {
    chunker: TextChunker,
}

impl ChunkAssembler {
    /// Create an assembler around a chunker
    pub fn new(chunker: TextChunker) -> Self {
        Self { chunker }
    }

    /// The chunker in use
    pub fn chunker(&self) -> &TextChunker {
        &self.chunker
    }

    /// Chunk `text` and number the pieces `0..N-1` under `doc_id`
    pub fn assemble(&self, text: &str, doc_id: &str) -> Vec<TextChunk> {
        self.chunker
            .chunk(text)
            .into_iter()
            .enumerate()
            .map(|(chunk_id, chunk)| TextChunk::new(doc_id, chunk_id, chunk))
            .collect()
    }
}

/// First, second and last chunks of a document, plus the total count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkPreview {
    /// Total number of chunks
    pub number_of_chunks: usize,

    /// Chunk 0
    #[serde(rename = "chunk_1")]
    pub first: Option<TextChunk>,

    /// Chunk 1
    #[serde(rename = "chunk_2")]
    pub second: Option<TextChunk>,

    /// Chunk N-1 (the same as `first` when there is a single chunk)
    #[serde(rename = "chunk_last")]
    pub last: Option<TextChunk>,
}

impl ChunkPreview {
    /// Select the preview chunks from a full sequence
    pub fn from_chunks(chunks: &[TextChunk]) -> Self {
        Self {
            number_of_chunks: chunks.len(),
            first: chunks.first().cloned(),
            second: chunks.get(1).cloned(),
            last: chunks.last().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 500, 100).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_text("Short text here.", 500, 100).unwrap();
        assert_eq!(chunks, vec!["Short text here.".to_string()]);
    }

    #[test]
    fn test_equal_size_and_overlap_is_rejected() {
        assert!(matches!(
            chunk_text("anything", 100, 100),
            Err(ExtractorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_overlap_larger_than_size_is_rejected() {
        assert!(TextChunker::new(10, 20).is_err());
        assert!(TextChunker::new(0, 0).is_err());
    }

    #[test]
    fn test_huge_chunk_size_does_not_overflow() {
        let chunks = chunk_text("abc", usize::MAX, usize::MAX - 1).unwrap();
        assert_eq!(chunks, vec!["abc", "bc", "c"]);
    }

    #[test]
    fn test_overlapping_windows() {
        let chunks = chunk_text("abcdefghij", 4, 2).unwrap();
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "ghij", "ij"]);
    }

    #[test]
    fn test_zero_overlap_partitions_text() {
        let chunks = chunk_text("abcdefg", 3, 0).unwrap();
        assert_eq!(chunks, vec!["abc", "def", "g"]);
        assert_eq!(chunks.concat(), "abcdefg");
    }

    #[test]
    fn test_default_sizes_on_long_text() {
        let text: String = (0..1000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = TextChunker::default().chunk(&text);

        // starts at 0, 400, 800
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 500);
        assert_eq!(chunks[1].len(), 500);
        assert_eq!(chunks[2].len(), 200);
        assert_eq!(&chunks[0][400..], &chunks[1][..100]);
        assert!(text.ends_with(chunks[2].as_str()));
    }

    #[test]
    fn test_multibyte_text_splits_on_chars() {
        let chunks = chunk_text("北京大学软件工程", 3, 1).unwrap();
        assert_eq!(chunks, vec!["北京大", "大学软", "软件工", "工程"]);
    }

    #[test]
    fn test_assemble_numbers_chunks() {
        let assembler = ChunkAssembler::new(TextChunker::new(4, 2).unwrap());
        let chunks = assembler.assemble("abcdefghij", "doc1");

        assert_eq!(chunks.len(), 5);
        for (idx, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, idx);
            assert_eq!(chunk.doc_id, "doc1");
        }
        assert_eq!(chunks[1].text, "cdef");
    }

    #[test]
    fn test_assemble_empty_text() {
        assert!(ChunkAssembler::default().assemble("", "doc1").is_empty());
    }

    #[test]
    fn test_preview_of_many_chunks() {
        let chunks = ChunkAssembler::new(TextChunker::new(4, 2).unwrap()).assemble("abcdefghij", "d");
        let preview = ChunkPreview::from_chunks(&chunks);

        assert_eq!(preview.number_of_chunks, 5);
        assert_eq!(preview.first.unwrap().chunk_id, 0);
        assert_eq!(preview.second.unwrap().chunk_id, 1);
        assert_eq!(preview.last.unwrap().chunk_id, 4);
    }

    #[test]
    fn test_preview_of_single_chunk() {
        let chunks = ChunkAssembler::default().assemble("tiny", "d");
        let preview = ChunkPreview::from_chunks(&chunks);

        assert_eq!(preview.number_of_chunks, 1);
        assert!(preview.second.is_none());
        assert_eq!(preview.first, preview.last);
    }

    #[test]
    fn test_preview_of_nothing() {
        let preview = ChunkPreview::from_chunks(&[]);
        assert_eq!(preview.number_of_chunks, 0);
        assert!(preview.first.is_none());
        assert!(preview.second.is_none());
        assert!(preview.last.is_none());
    }

    #[test]
    fn test_preview_wire_names() {
        let preview = ChunkPreview::from_chunks(&[TextChunk::new("d", 0, "x")]);
        let value = serde_json::to_value(&preview).unwrap();
        assert_eq!(value["number_of_chunks"], 1);
        assert_eq!(value["chunk_1"]["text"], "x");
        assert!(value["chunk_2"].is_null());
        assert_eq!(value["chunk_last"]["chunk_id"], 0);
    }

    proptest! {
        #[test]
        fn prop_chunk_geometry(
            text in "\\PC{0,300}",
            chunk_size in 1usize..60,
            overlap_seed in 0usize..60,
        ) {
            let overlap = overlap_seed % chunk_size;
            let chunker = TextChunker::new(chunk_size, overlap).unwrap();
            let chunks = chunker.chunk(&text);
            let chars: Vec<char> = text.chars().collect();
            let stride = chunk_size - overlap;

            prop_assert_eq!(chunks.len(), (chars.len() + stride - 1) / stride);

            for (idx, chunk) in chunks.iter().enumerate() {
                let start = idx * stride;
                let end = usize::min(start + chunk_size, chars.len());
                let expected: String = chars[start..end].iter().collect();
                prop_assert_eq!(chunk, &expected);
            }

            if let Some(last) = chunks.last() {
                prop_assert!(text.ends_with(last.as_str()));
            }
        }
    }
}
