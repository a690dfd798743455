//! Candidate-label matchers.
//!
//! Two strategies run per normalized line. The catalog matcher is tried
//! first; the colon heuristic only runs when no catalog entry relates to the
//! line at all.
//!
//! Catalog matching is bidirectional substring containment with catalog order
//! as the only tie-break. Short entries such as `"E"` relate to almost every
//! line, so the label that comes out is usually the line itself rather than
//! the entry. That is the accepted behavior; scoring matches by similarity
//! would change which labels get accepted.

use std::collections::HashSet;

use crate::profile::ExtractionProfile;

/// Fallback labels at or above this many characters are prose, not labels.
pub const MAX_FALLBACK_LABEL_CHARS: usize = 60;

/// Fallback labels at or below this many characters are too short to trust.
pub const MIN_FALLBACK_LABEL_CHARS: usize = 2;

/// Result of running the catalog matcher over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMatch {
    /// No catalog entry relates to the line.
    NoMatch,
    /// An entry matched but the derived label was already accepted.
    Duplicate { entry: usize },
    /// An entry matched and produced a new label.
    Accepted { entry: usize, label: String },
}

/// Return the index of the first catalog entry related to `line`.
pub fn find_catalog_entry(line: &str, catalog: &[String]) -> Option<usize> {
    let line_lower = line.to_lowercase();
    catalog.iter().position(|entry| {
        let entry_lower = entry.to_lowercase();
        line_lower.contains(&entry_lower) || entry_lower.contains(&line_lower)
    })
}

/// Text before the first colon, or the whole line.
fn before_colon(line: &str) -> &str {
    line.split_once(':').map_or(line, |(head, _)| head)
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive the catalog-path label for a line.
pub fn catalog_label(line: &str) -> String {
    collapse_whitespace(before_colon(line))
}

/// Match `line` against the catalog, recording an accepted label in
/// `seen_labels`.
///
/// A matched entry whose label comes out empty (the line starts with a colon)
/// is reported as [`CatalogMatch::NoMatch`] so the fallback gets its turn.
pub fn match_catalog(
    line: &str,
    profile: &ExtractionProfile,
    seen_labels: &mut HashSet<String>,
) -> CatalogMatch {
    let Some(entry) = find_catalog_entry(line, &profile.catalog) else {
        return CatalogMatch::NoMatch;
    };

    let label = catalog_label(line);
    if label.is_empty() {
        return CatalogMatch::NoMatch;
    }

    if seen_labels.insert(label.clone()) {
        CatalogMatch::Accepted { entry, label }
    } else {
        CatalogMatch::Duplicate { entry }
    }
}

/// Decimal and digit characters. Letter numerals (`Ⅶ`, `〇`) and vulgar
/// fractions are numeric but not digits.
fn is_digit(ch: char) -> bool {
    ch.is_numeric()
        && !matches!(
            ch,
            '\u{BC}'..='\u{BE}'
                | '\u{2150}'..='\u{218F}'
                | '\u{3007}'
                | '\u{3021}'..='\u{3029}'
                | '\u{3038}'..='\u{303A}'
                | '\u{16EE}'..='\u{16F0}'
        )
}

/// Why the colon heuristic declined a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoColon,
    TooLong,
    AlreadySeen,
    AllDigits,
    TooShort,
    ProtectedPrefix,
}

/// Apply the generic `label: value` heuristic to a line no catalog entry
/// matched. On success the label is recorded in `seen_labels`.
pub fn match_fallback(
    line: &str,
    profile: &ExtractionProfile,
    seen_labels: &mut HashSet<String>,
) -> Result<String, Rejection> {
    let Some((head, _)) = line.split_once(':') else {
        return Err(Rejection::NoColon);
    };
    let label = head.trim();
    let chars = label.chars().count();

    if chars >= MAX_FALLBACK_LABEL_CHARS {
        return Err(Rejection::TooLong);
    }
    if seen_labels.contains(label) {
        return Err(Rejection::AlreadySeen);
    }
    if !label.is_empty() && label.chars().all(is_digit) {
        return Err(Rejection::AllDigits);
    }
    if chars <= MIN_FALLBACK_LABEL_CHARS {
        return Err(Rejection::TooShort);
    }
    if !profile.protected_prefix.is_empty() && label.starts_with(&profile.protected_prefix) {
        return Err(Rejection::ProtectedPrefix);
    }

    seen_labels.insert(label.to_string());
    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[&str]) -> ExtractionProfile {
        ExtractionProfile {
            catalog: entries.iter().map(|s| s.to_string()).collect(),
            ..ExtractionProfile::default()
        }
    }

    #[test]
    fn test_line_contains_entry() {
        let profile = catalog(&["Odo Start", "Odo End"]);
        assert_eq!(find_catalog_entry("Odo End: 12400", &profile.catalog), Some(1));
    }

    #[test]
    fn test_entry_contains_line() {
        let profile = catalog(&["Date / Day # / Region\u{2013}Route"]);
        assert_eq!(find_catalog_entry("Date / Day # / Region", &profile.catalog), Some(0));
    }

    #[test]
    fn test_first_entry_wins_over_better_match() {
        let profile = catalog(&["E", "Notes / Observations"]);
        assert_eq!(find_catalog_entry("Notes / Observations", &profile.catalog), Some(0));
    }

    #[test]
    fn test_containment_is_case_insensitive() {
        let profile = catalog(&["Tire PSI"]);
        assert_eq!(find_catalog_entry("TIRE psi: 32", &profile.catalog), Some(0));
    }

    #[test]
    fn test_no_catalog_entry() {
        let profile = catalog(&["Odo Start"]);
        assert_eq!(find_catalog_entry("Camp: Ridge", &profile.catalog), None);
    }

    #[test]
    fn test_catalog_label_before_colon_and_collapsed() {
        assert_eq!(catalog_label("Odo   Start :  12345"), "Odo Start");
        assert_eq!(catalog_label("Fuel\tEnd"), "Fuel End");
        assert_eq!(catalog_label("a: b: c"), "a");
    }

    #[test]
    fn test_match_catalog_accepts_then_reports_duplicate() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();

        let first = match_catalog("Fuel End: 10", &profile, &mut seen);
        assert!(matches!(first, CatalogMatch::Accepted { ref label, .. } if label == "Fuel End"));

        let second = match_catalog("Fuel End: 20", &profile, &mut seen);
        assert!(matches!(second, CatalogMatch::Duplicate { .. }));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_match_catalog_empty_label_is_no_match() {
        let profile = catalog(&["value"]);
        let mut seen = HashSet::new();
        assert_eq!(match_catalog(": value", &profile, &mut seen), CatalogMatch::NoMatch);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_fallback_accepts_plain_label() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();
        assert_eq!(
            match_fallback("Camp: Ridge", &profile, &mut seen),
            Ok("Camp".to_string())
        );
        assert!(seen.contains("Camp"));
    }

    #[test]
    fn test_fallback_trims_but_keeps_inner_whitespace() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();
        assert_eq!(
            match_fallback("  Base   Camp : x", &profile, &mut seen),
            Ok("Base   Camp".to_string())
        );
    }

    #[test]
    fn test_fallback_length_boundary() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();

        let sixty = "q".repeat(60);
        assert_eq!(
            match_fallback(&format!("{sixty}: v"), &profile, &mut seen),
            Err(Rejection::TooLong)
        );

        let fifty_nine = "q".repeat(59);
        assert_eq!(
            match_fallback(&format!("{fifty_nine}: v"), &profile, &mut seen),
            Ok(fifty_nine)
        );
    }

    #[test]
    fn test_fallback_rejections() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();
        seen.insert("Camp".to_string());

        assert_eq!(match_fallback("no colon here", &profile, &mut seen), Err(Rejection::NoColon));
        assert_eq!(match_fallback("Camp: again", &profile, &mut seen), Err(Rejection::AlreadySeen));
        assert_eq!(match_fallback("12345: x", &profile, &mut seen), Err(Rejection::AllDigits));
        assert_eq!(match_fallback("Ab: x", &profile, &mut seen), Err(Rejection::TooShort));
        assert_eq!(match_fallback(": x", &profile, &mut seen), Err(Rejection::TooShort));
        assert_eq!(
            match_fallback("Wayfinder v3: x", &profile, &mut seen),
            Err(Rejection::ProtectedPrefix)
        );
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_fallback_digit_labels() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();
        assert_eq!(match_fallback("١٢٣: x", &profile, &mut seen), Err(Rejection::AllDigits));
        assert_eq!(match_fallback("²³⁴: x", &profile, &mut seen), Err(Rejection::AllDigits));
        assert_eq!(
            match_fallback("ⅦⅧⅨ: x", &profile, &mut seen),
            Ok("ⅦⅧⅨ".to_string())
        );
        assert_eq!(match_fallback("½¾¼: x", &profile, &mut seen), Ok("½¾¼".to_string()));
    }

    #[test]
    fn test_fallback_protected_prefix_is_case_sensitive() {
        let profile = ExtractionProfile::default();
        let mut seen = HashSet::new();
        assert_eq!(
            match_fallback("wayfinder id: 7", &profile, &mut seen),
            Ok("wayfinder id".to_string())
        );
    }
}
