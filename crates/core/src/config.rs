use serde::{Deserialize, Serialize};

use crate::classify::FieldType;

/// One form field discovered in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub source: String,
    pub total_fields: usize,
}

/// The persisted field configuration consumed by the form renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub fields: Vec<FieldDescriptor>,
    pub metadata: ConfigMetadata,
}

impl FieldConfig {
    pub fn new(fields: Vec<FieldDescriptor>, source: impl Into<String>) -> Self {
        let total_fields = fields.len();
        Self {
            fields,
            metadata: ConfigMetadata {
                source: source.into(),
                total_fields,
            },
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse a field configuration, requiring a `fields` array.
///
/// Hand-edited configs sometimes drop `metadata`; it is rebuilt from the
/// fields when missing.
pub fn parse_field_config(json: &str) -> Result<FieldConfig, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {e}"))?;

    let Some(fields) = value.get("fields").filter(|f| f.is_array()) else {
        return Err("Invalid field configuration: must have a fields array".to_string());
    };

    let fields: Vec<FieldDescriptor> = serde_json::from_value(fields.clone())
        .map_err(|e| format!("Invalid field descriptor: {e}"))?;

    match value.get("metadata") {
        Some(metadata) => {
            let metadata: ConfigMetadata = serde_json::from_value(metadata.clone())
                .map_err(|e| format!("Invalid metadata: {e}"))?;
            Ok(FieldConfig { fields, metadata })
        }
        None => Ok(FieldConfig::new(fields, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, label: &str, field_type: FieldType, page: usize) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            page,
        }
    }

    #[test]
    fn test_config_shape() {
        let config = FieldConfig::new(
            vec![descriptor("odo_start", "Odo Start", FieldType::Number, 1)],
            "docs/log.pdf",
        );
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(value["fields"][0]["name"], "odo_start");
        assert_eq!(value["fields"][0]["label"], "Odo Start");
        assert_eq!(value["fields"][0]["type"], "number");
        assert_eq!(value["fields"][0]["page"], 1);
        assert_eq!(value["metadata"]["source"], "docs/log.pdf");
        assert_eq!(value["metadata"]["total_fields"], 1);
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let config = FieldConfig::new(vec![], "x.pdf");
        let json = config.to_json().unwrap();
        assert!(json.contains("\n  \"fields\": []"));
    }

    #[test]
    fn test_parse_round_trip() {
        let config = FieldConfig::new(
            vec![
                descriptor("notes", "Notes", FieldType::Textarea, 1),
                descriptor("sky", "Sky", FieldType::Text, 2),
            ],
            "log.pdf",
        );
        let parsed = parse_field_config(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_requires_fields_array() {
        let err = parse_field_config(r#"{"fields": {}}"#).unwrap_err();
        assert!(err.contains("must have a fields array"));
        let err = parse_field_config(r#"{"metadata": {}}"#).unwrap_err();
        assert!(err.contains("must have a fields array"));
    }

    #[test]
    fn test_parse_rebuilds_missing_metadata() {
        let json = r#"{"fields": [{"name": "agree", "label": "Agree", "type": "checkbox", "page": 1}]}"#;
        let parsed = parse_field_config(json).unwrap();
        assert_eq!(parsed.metadata.total_fields, 1);
        assert_eq!(parsed.fields[0].field_type, FieldType::Checkbox);
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(parse_field_config("not json").unwrap_err().starts_with("Invalid JSON"));
    }
}
