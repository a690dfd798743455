//! Content-specific constants for one family of source documents.
//!
//! The pipeline itself is generic: everything that names the document being
//! scanned (its title, boilerplate, the labels we expect to find on it) lives
//! in an [`ExtractionProfile`]. The built-in profile targets the WayFinder
//! expedition log; custom profiles are loaded from TOML and override only the
//! keys they set.

use serde::{Deserialize, Serialize};

/// Errors raised while loading a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid profile TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render profile as TOML: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("profile catalog must not contain blank entries (index {0})")]
    BlankCatalogEntry(usize),
}

/// Boilerplate lines (product name, document title, tagline) that never carry
/// a field label. Matched case-insensitively anywhere in the line.
pub const DEFAULT_BOILERPLATE_MARKERS: &[&str] = &["WAYFINDER", "EXPEDITION LOG", "THE WAY FORWARD"];

/// Running page headers/footers start with this literal (case-sensitive).
pub const DEFAULT_PAGE_MARKER_PREFIX: &str = "Page";

/// Fallback-matched labels starting with this are the document title, not a field.
pub const DEFAULT_PROTECTED_PREFIX: &str = "Wayfinder";

/// Every label expected on the expedition log, in match-priority order.
pub const DEFAULT_CATALOG: &[&str] = &[
    // Page 1: main log
    "Date / Day # / Region\u{2013}Route",
    "Route & Fuel Data",
    "Odo Start",
    "Odo End",
    "Dist",
    "Fuel Start",
    "Fuel End",
    "MPG",
    "Tire PSI",
    "Expedition Leader",
    "WX / Temp / Wind / Radio Ch.",
    "Team & Roles",
    "Name",
    "Role",
    "E",
    "M",
    "Notes",
    "Objectives (Today)",
    "Time Position (Lat/Lon) Terrain Event / Action",
    "Sketch / Map Box",
    "Notes / Observations",
    "End-of-Day Summary",
    "Top 3 Lessons Learned",
    "Next-Day Objectives",
    "Equipment / Vehicles to Inspect",
    "Distance Today",
    "Drive / Stop Time",
    "Recoveries",
    "Lessons Learned",
    // Page 2: environmental & maintenance
    "Weather Trends (M / MD / E)",
    "Temp",
    "Wind",
    "Sky",
    "Precip",
    "Terrain Type Tracker",
    "Sand",
    "Rock",
    "Mud",
    "Water",
    "Snow",
    "Forest",
    "Gravel",
    "Vehicle Maintenance Checkpoints",
    "Oil",
    "Coolant",
    "Brakes",
    "Tires",
    "Suspension",
    "Lights",
    "Winch",
    "Recovery Gear",
    "Electrics",
    "Environmental Observations",
    "Action Items / Next Steps",
    "Light Data",
    "Sunrise",
    "Sunset",
    // Page 2: leadership & reflection
    "Leadership Challenges Faced Today",
    "Team Cohesion Notes (Trust, Friction, Breakthroughs)",
    "Self-Awareness Journal (Reactions, Decisions, Growth)",
    "Lessons to Carry Forward",
];

/// Document-specific data consumed by the normalizer and matchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionProfile {
    pub boilerplate_markers: Vec<String>,
    pub page_marker_prefix: String,
    pub protected_prefix: String,
    pub catalog: Vec<String>,
}

impl Default for ExtractionProfile {
    fn default() -> Self {
        Self {
            boilerplate_markers: to_owned_vec(DEFAULT_BOILERPLATE_MARKERS),
            page_marker_prefix: DEFAULT_PAGE_MARKER_PREFIX.to_string(),
            protected_prefix: DEFAULT_PROTECTED_PREFIX.to_string(),
            catalog: to_owned_vec(DEFAULT_CATALOG),
        }
    }
}

impl ExtractionProfile {
    /// Parse a profile from TOML. Keys missing from the document keep their
    /// built-in values.
    pub fn from_toml_str(source: &str) -> Result<Self, ProfileError> {
        let profile: ExtractionProfile = toml::from_str(source)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Render the profile as TOML.
    pub fn to_toml_string(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A blank catalog entry would be contained in every line and swallow the
    /// whole document, so reject it up front.
    pub fn validate(&self) -> Result<(), ProfileError> {
        match self.catalog.iter().position(|entry| entry.trim().is_empty()) {
            Some(idx) => Err(ProfileError::BlankCatalogEntry(idx)),
            None => Ok(()),
        }
    }
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
