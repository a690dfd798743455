use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a generated field name, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Substituted when a label sanitizes to nothing.
pub const FALLBACK_NAME: &str = "field";

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s-]+").unwrap());
static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Convert a label into a machine-safe field name.
///
/// `"Odo Start"` becomes `"odo_start"`, `"Notes / Observations"` becomes
/// `"notes_observations"`. Labels with no word characters yield `"field"`.
pub fn sanitize_field_name(label: &str) -> String {
    let name = DISALLOWED.replace_all(label, "");
    let name = SEPARATORS.replace_all(&name, "_");
    let name = UNDERSCORES.replace_all(&name, "_");
    let name = name.trim_matches('_').to_lowercase();
    let name: String = name.chars().take(MAX_NAME_CHARS).collect();

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}
