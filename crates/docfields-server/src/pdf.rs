//! PDF text extraction.
//!
//! Loads a PDF from memory with `lopdf` and keeps the text of every page in
//! page order. Previews and full-document text are built from page lines.

use thiserror::Error;
use tracing::warn;

/// PDF extraction error
#[derive(Debug, Error)]
pub enum PdfError {
    /// Bytes are not a readable PDF document
    #[error("Failed to load PDF: {0}")]
    Load(String),
}

/// Text of a PDF document, one entry per page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    pages: Vec<String>,
}

impl PdfText {
    /// Extract per-page text from PDF bytes
    ///
    /// A page whose text cannot be decoded contributes an empty string.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| PdfError::Load(e.to_string()))?;

        let pages = doc
            .get_pages()
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Could not extract text from page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        Ok(Self { pages })
    }

    /// Build from already-extracted page texts
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Lines of the first `max_pages` pages, in order
    pub fn lines(&self, max_pages: usize) -> Vec<&str> {
        self.pages
            .iter()
            .take(max_pages)
            .flat_map(|page| split_lines(page))
            .collect()
    }

    /// First `max_lines` lines of the first `max_pages` pages, joined by `\n`
    pub fn preview(&self, max_pages: usize, max_lines: usize) -> String {
        let lines = self.lines(max_pages);
        lines[..lines.len().min(max_lines)].join("\n")
    }

    /// Every line of every page, joined by `\n`
    pub fn full_text(&self) -> String {
        self.lines(self.pages.len()).join("\n")
    }
}

/// Split on line boundaries the way most text tools do: `\n`, `\r`, `\r\n`
/// and the Unicode separators. A trailing break does not add an empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
