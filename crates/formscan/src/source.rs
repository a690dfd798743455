//! Page-text sources: turn an input file into page-ordered text blocks.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::prelude::*;

/// Form feed, the page separator used by `pdftotext` and plain-text inputs.
const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Built-in PDF text extraction
    #[default]
    Lopdf,
    /// Poppler's `pdftotext` executable
    Pdftotext,
    /// Pre-extracted UTF-8 text, pages separated by form feeds
    Text,
}

/// A backend that is ready to read pages.
#[derive(Debug)]
pub enum PageSource {
    Lopdf,
    Pdftotext { program: PathBuf },
    Text,
}

impl PageSource {
    /// Resolve the backend, checking that any external tool it needs exists.
    pub fn resolve(backend: Backend) -> Result<Self> {
        match backend {
            Backend::Lopdf => Ok(PageSource::Lopdf),
            Backend::Text => Ok(PageSource::Text),
            Backend::Pdftotext => {
                let program = which::which("pdftotext").map_err(|_| Error::MissingDependency {
                    tool: "pdftotext",
                    hint: "Install poppler-utils or use --backend lopdf.",
                })?;
                Ok(PageSource::Pdftotext { program })
            }
        }
    }

    /// Read every page of `path`, in document order.
    pub fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>> {
        match self {
            PageSource::Lopdf => {
                let doc = pdf::TextDocument::open(path)
                    .map_err(|e| Error::Extraction(e.to_string()))?;

                let info = doc.info();
                log::debug!(
                    "{}: {} pages, title {:?}, author {:?}, creator {:?}",
                    path.display(),
                    info.page_count,
                    info.title,
                    info.author,
                    info.creator
                );

                let pages = doc.pages().map_err(|e| Error::Extraction(e.to_string()))?;
                Ok(pages.into_iter().map(|p| p.text).collect())
            }
            PageSource::Pdftotext { program } => {
                let output = Command::new(program)
                    .args(["-layout", "-enc", "UTF-8"])
                    .arg(path)
                    .arg("-")
                    .output()
                    .with_context(|| f!("Failed to run {}", program.display()))?;

                if !output.status.success() {
                    return Err(Error::Extraction(f!(
                        "pdftotext exited with {}: {}",
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    ))
                    .into());
                }

                Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
            }
            PageSource::Text => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| f!("Failed to read {}", path.display()))?;
                Ok(split_pages(&text))
            }
        }
    }
}

/// Split form-feed separated text into pages. A trailing form feed closes the
/// last page rather than opening an empty one; blank pages become `None`.
pub fn split_pages(text: &str) -> Vec<Option<String>> {
    if text.is_empty() {
        return Vec::new();
    }

    let body = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    body.split(PAGE_BREAK)
        .map(|page| {
            if page.trim().is_empty() {
                None
            } else {
                Some(page.to_string())
            }
        })
        .collect()
}
