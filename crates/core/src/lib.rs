//! Core library for formscan
//!
//! This crate is the **Functional Core** of formscan: it turns page-ordered
//! document text into a deduplicated list of form-field descriptors. It does
//! no I/O. Decoding documents and writing configuration files live in the
//! `pdf` crate and the `formscan` binary (the Imperative Shell).
//!
//! # Pipeline
//!
//! ```text
//! pages ─▶ lines ─▶ normalize ─▶ catalog match ─┬─▶ classify + slug ─▶ dedup by name
//!                                  (no match)   │
//!                                  colon match ─┘
//! ```
//!
//! - [`normalize`]: drops blank lines, boilerplate and page headers
//! - [`matcher`]: catalog and `label: value` matchers, raw-label dedup
//! - [`classify`]: keyword rules mapping a label to a [`FieldType`]
//! - [`slug`]: label → machine-safe field name
//! - [`extract`]: the per-run driver and final name dedup
//! - [`profile`]: document-specific constants (catalog, markers, prefixes)
//! - [`config`]: the persisted `field-config.json` shape
//! - [`sections`]: grouping of fields into the form's display sections
//!
//! # Example Usage
//!
//! ```rust
//! use formscan_core::{extract_fields, ExtractionProfile, FieldType};
//!
//! let pages = vec![Some("Odo Start: 12345\nNotes / Observations"), None];
//! let fields = extract_fields(pages, &ExtractionProfile::default());
//!
//! assert_eq!(fields[0].name, "odo_start");
//! assert_eq!(fields[0].field_type, FieldType::Number);
//! assert_eq!(fields[1].field_type, FieldType::Textarea);
//! ```

pub mod classify;
pub mod config;
pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod profile;
pub mod sections;
pub mod slug;

pub use classify::{classify, FieldType};
pub use config::{parse_field_config, ConfigMetadata, FieldConfig, FieldDescriptor};
pub use extract::{extract_fields, extract_fields_with_stats, ExtractionStats, FieldExtractor};
pub use profile::{ExtractionProfile, ProfileError};
pub use slug::sanitize_field_name;
