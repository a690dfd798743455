use crate::profile::ExtractionProfile;

/// Lines shorter than this (in characters, after trimming) are noise.
pub const MIN_LINE_CHARS: usize = 2;

/// Trim `line` and decide whether it can carry a label.
///
/// Returns `None` for blank or single-character lines, for lines containing
/// one of the profile's boilerplate markers (case-insensitive), and for
/// running page headers starting with the page-marker prefix.
pub fn normalize_line<'a>(line: &'a str, profile: &ExtractionProfile) -> Option<&'a str> {
    let line = line.trim();
    if line.chars().count() < MIN_LINE_CHARS {
        return None;
    }

    let lower = line.to_lowercase();
    if profile
        .boilerplate_markers
        .iter()
        .any(|marker| lower.contains(&marker.to_lowercase()))
    {
        return None;
    }

    if !profile.page_marker_prefix.is_empty() && line.starts_with(&profile.page_marker_prefix) {
        return None;
    }

    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(line: &str) -> Option<&str> {
        normalize_line(line, &ExtractionProfile::default())
    }

    #[test]
    fn test_trims_line() {
        assert_eq!(norm("   Odo Start: 123  "), Some("Odo Start: 123"));
    }

    #[test]
    fn test_skips_blank_and_short_lines() {
        assert_eq!(norm(""), None);
        assert_eq!(norm("    "), None);
        assert_eq!(norm(" x "), None);
        assert_eq!(norm("42"), Some("42"));
    }

    #[test]
    fn test_short_line_counts_characters_not_bytes() {
        // One multi-byte character is still a single character.
        assert_eq!(norm("\u{00E9}"), None);
    }

    #[test]
    fn test_skips_boilerplate_case_insensitive() {
        assert_eq!(norm("WAYFINDER"), None);
        assert_eq!(norm("Wayfinder Expedition Log v3.1"), None);
        assert_eq!(norm("the way forward"), None);
        assert_eq!(norm("My expedition log entry"), None);
    }

    #[test]
    fn test_skips_page_header_case_sensitive() {
        assert_eq!(norm("Page 1 of 2"), None);
        assert_eq!(norm("Pages"), None);
        assert_eq!(norm("page notes"), Some("page notes"));
    }

    #[test]
    fn test_custom_profile_markers() {
        let profile = ExtractionProfile {
            boilerplate_markers: vec!["field book".to_string()],
            page_marker_prefix: String::new(),
            ..ExtractionProfile::default()
        };
        assert_eq!(normalize_line("FIELD BOOK 2026", &profile), None);
        assert_eq!(normalize_line("Wayfinder", &profile), Some("Wayfinder"));
        assert_eq!(normalize_line("Page 3", &profile), Some("Page 3"));
    }
}
