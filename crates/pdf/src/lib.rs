use thiserror::Error;

use parser::backend::{LopdfBackend, PdfBackend};

pub mod parser;
pub mod types;

pub use types::*;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A loaded PDF document ready for per-page text extraction.
pub struct TextDocument {
    backend: LopdfBackend,
}

impl TextDocument {
    /// Parse PDF bytes. Encrypted documents are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        Ok(Self {
            backend: LopdfBackend::load_bytes(bytes)?,
        })
    }

    /// Read and parse a PDF file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Text of every page in page-tree order.
    pub fn pages(&self) -> Result<Vec<PageText>, PdfError> {
        extract_pages(&self.backend)
    }

    /// Document metadata.
    pub fn info(&self) -> DocumentInfo {
        extract_info(&self.backend)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn extract_pages(backend: &dyn PdfBackend) -> Result<Vec<PageText>, PdfError> {
    let page_map = backend.pages();
    let mut pages = Vec::with_capacity(page_map.len());

    for (&page_num, &page_id) in &page_map {
        let text = parser::layout::page_text(backend, page_id)?;
        log::debug!(
            "page {page_num}: {} chars",
            text.as_deref().map_or(0, |t| t.chars().count())
        );
        pages.push(PageText {
            page: page_num as usize,
            text,
        });
    }

    Ok(pages)
}

fn extract_info(backend: &LopdfBackend) -> DocumentInfo {
    let mut raw = backend.metadata();
    DocumentInfo {
        title: raw.remove("Title"),
        author: raw.remove("Author"),
        creator: raw.remove("Creator"),
        page_count: backend.page_count(),
    }
}
