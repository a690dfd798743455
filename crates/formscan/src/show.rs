use std::path::{Path, PathBuf};

use colored::Colorize;
use formscan_core::{parse_field_config, sections, FieldConfig};

use crate::prelude::{println, *};

#[derive(Debug, clap::Args)]
pub struct App {
    /// Field configuration produced by `formscan extract`
    config: PathBuf,

    /// Output the sections as JSON
    #[arg(long)]
    json: bool,
}

/// Read and validate a field configuration file.
pub fn load_config(path: &Path) -> Result<FieldConfig> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()).into());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| f!("Failed to read {}", path.display()))?;

    Ok(parse_field_config(&json).map_err(Error::InvalidConfig)?)
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let config = load_config(&app.config)?;
    let sections = sections::organize(&config.fields);

    if app.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    for section in sections.iter().filter(|s| !s.fields.is_empty()) {
        println!("{}", section.title.bold().cyan());

        let mut table = new_table();
        table.add_row(prettytable::row!["Name", "Label", "Type", "Page"]);
        for field in &section.fields {
            table.add_row(prettytable::row![
                field.name,
                field.label,
                field.field_type,
                field.page
            ]);
        }
        table.printstd();
        println!();
    }

    println!(
        "{} fields from {}",
        config.metadata.total_fields,
        config.metadata.source.dimmed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_rejects_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field-config.json");
        std::fs::write(&path, r#"{"metadata":{"source":"x","total_fields":0}}"#).unwrap();

        let err = load_config(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid field configuration: must have a fields array"
        );
    }

    #[test]
    fn test_load_config_reads_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field-config.json");
        std::fs::write(
            &path,
            r#"{"fields":[{"name":"oil","label":"Oil","type":"text","page":2}]}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.fields.len(), 1);
        assert_eq!(config.metadata.total_fields, 1);
    }
}
