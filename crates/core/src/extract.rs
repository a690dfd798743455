//! The extraction pipeline: pages → lines → labels → descriptors.

use std::collections::HashSet;

use crate::classify::classify;
use crate::config::FieldDescriptor;
use crate::matcher::{match_catalog, match_fallback, CatalogMatch};
use crate::normalize::normalize_line;
use crate::profile::ExtractionProfile;
use crate::slug::sanitize_field_name;

/// Counters describing one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub pages: usize,
    pub empty_pages: usize,
    pub lines: usize,
    pub skipped_lines: usize,
    pub catalog_matches: usize,
    pub fallback_matches: usize,
    pub duplicate_labels: usize,
    pub rejected_lines: usize,
    pub duplicate_names: usize,
}

/// Accumulates descriptors across pages for a single run.
///
/// Pages must be pushed in document order; `seen_labels` carries across
/// pages so a label is accepted at most once per run.
#[derive(Debug)]
pub struct FieldExtractor<'p> {
    profile: &'p ExtractionProfile,
    seen_labels: HashSet<String>,
    candidates: Vec<FieldDescriptor>,
    stats: ExtractionStats,
}

impl<'p> FieldExtractor<'p> {
    pub fn new(profile: &'p ExtractionProfile) -> Self {
        Self {
            profile,
            seen_labels: HashSet::new(),
            candidates: Vec::new(),
            stats: ExtractionStats::default(),
        }
    }

    /// Process one page of text. `page` is 1-based; `None` or blank text
    /// contributes nothing.
    pub fn push_page(&mut self, page: usize, text: Option<&str>) {
        self.stats.pages += 1;

        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            log::debug!("page {page}: no text");
            self.stats.empty_pages += 1;
            return;
        };

        for raw in text.lines() {
            self.stats.lines += 1;
            match normalize_line(raw, self.profile) {
                Some(line) => self.push_line(page, line),
                None => self.stats.skipped_lines += 1,
            }
        }
    }

    fn push_line(&mut self, page: usize, line: &str) {
        match match_catalog(line, self.profile, &mut self.seen_labels) {
            CatalogMatch::Accepted { entry, label } => {
                log::trace!("page {page}: catalog[{entry}] accepted {label:?}");
                self.stats.catalog_matches += 1;
                self.accept(page, label);
            }
            CatalogMatch::Duplicate { entry } => {
                log::trace!("page {page}: catalog[{entry}] duplicate label in {line:?}");
                self.stats.duplicate_labels += 1;
            }
            CatalogMatch::NoMatch => match match_fallback(line, self.profile, &mut self.seen_labels) {
                Ok(label) => {
                    log::trace!("page {page}: fallback accepted {label:?}");
                    self.stats.fallback_matches += 1;
                    self.accept(page, label);
                }
                Err(reason) => {
                    log::trace!("page {page}: rejected {line:?} ({reason:?})");
                    self.stats.rejected_lines += 1;
                }
            },
        }
    }

    fn accept(&mut self, page: usize, label: String) {
        self.candidates.push(FieldDescriptor {
            name: sanitize_field_name(&label),
            field_type: classify(&label),
            label,
            page,
        });
    }

    /// Descriptors accepted so far, before name deduplication.
    pub fn candidates(&self) -> &[FieldDescriptor] {
        &self.candidates
    }

    /// Run the final name deduplication and return the descriptors together
    /// with the run's counters.
    pub fn finish(mut self) -> (Vec<FieldDescriptor>, ExtractionStats) {
        let before = self.candidates.len();
        let fields = dedup_by_name(self.candidates);
        self.stats.duplicate_names = before - fields.len();
        (fields, self.stats)
    }
}

/// Keep the first descriptor for each generated name, preserving order.
pub fn dedup_by_name(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen_names = HashSet::new();
    fields
        .into_iter()
        .filter(|field| seen_names.insert(field.name.clone()))
        .collect()
}

/// Extract field descriptors from page texts given in document order.
pub fn extract_fields_with_stats<I, S>(
    pages: I,
    profile: &ExtractionProfile,
) -> (Vec<FieldDescriptor>, ExtractionStats)
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut extractor = FieldExtractor::new(profile);
    for (idx, text) in pages.into_iter().enumerate() {
        let text: Option<&str> = text.as_ref().map(|t| t.as_ref());
        extractor.push_page(idx + 1, text);
    }
    extractor.finish()
}

/// Like [`extract_fields_with_stats`], without the counters.
pub fn extract_fields<I, S>(pages: I, profile: &ExtractionProfile) -> Vec<FieldDescriptor>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    extract_fields_with_stats(pages, profile).0
}
