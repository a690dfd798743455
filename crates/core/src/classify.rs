//! Data-type inference for accepted labels.
//!
//! Rules run in a fixed order and the first hit wins:
//! `date` → `textarea` → `number` → `text`. Every test is a case-insensitive
//! substring check against one of the keyword tables below.

use serde::{Deserialize, Serialize};

/// Semantic input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    Textarea,
    Number,
    Text,
    /// Never produced by the classifier; accepted when reading configs that
    /// were edited by hand for the form renderer.
    Checkbox,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Text => "text",
            FieldType::Checkbox => "checkbox",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phrase that marks the combined date/day header.
pub const DATE_PHRASE: &str = "date / day";

/// Prefix that, together with [`DATE_DAY_TOKEN`], also marks a date field.
pub const DATE_PREFIX: &str = "date";
pub const DATE_DAY_TOKEN: &str = "day";

/// Free-form or narrative content.
pub const TEXTAREA_KEYWORDS: &[&str] = &[
    "notes",
    "observations",
    "summary",
    "objectives",
    "lessons",
    "challenges",
    "journal",
    "cohesion",
    "friction",
    "breakthroughs",
    "reactions",
    "decisions",
    "growth",
    "action items",
    "next steps",
    "environmental observations",
    "end-of-day",
    "sketch",
    "map",
    "terrain event",
    "lat/lon",
    "position",
];

/// Measured quantities.
pub const NUMBER_KEYWORDS: &[&str] = &[
    "odo", "dist", "fuel", "mpg", "psi", "temp", "wind", "radio", "sunrise", "sunset",
];

/// Infer the field type for `label`.
pub fn classify(label: &str) -> FieldType {
    let lower = label.to_lowercase();

    if is_date(&lower) {
        FieldType::Date
    } else if contains_any(&lower, TEXTAREA_KEYWORDS) {
        FieldType::Textarea
    } else if contains_any(&lower, NUMBER_KEYWORDS) {
        FieldType::Number
    } else {
        FieldType::Text
    }
}

/// Only genuine date headers, not every label that happens to mention "date".
fn is_date(lower: &str) -> bool {
    lower.contains(DATE_PHRASE) || (lower.starts_with(DATE_PREFIX) && lower.contains(DATE_DAY_TOKEN))
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lower.contains(kw))
}
