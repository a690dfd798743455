use std::io::Write;
use std::path::{Path, PathBuf};

use formscan_core::{extract_fields_with_stats, ExtractionProfile, ExtractionStats, FieldConfig};

use crate::prelude::{eprintln, println, *};
use crate::source::{Backend, PageSource};

const DEFAULT_INPUT: &str = "docs/WayFinder_Expedition_Log_v3_1_Print_Test.pdf";
const DEFAULT_OUTPUT: &str = "field-config.json";

#[derive(Debug, clap::Args)]
pub struct App {
    /// Document to scan for form fields
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the field configuration
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Profile TOML to merge over the built-in profile
    #[arg(long, env = "FORMSCAN_PROFILE")]
    profile: Option<PathBuf>,

    /// Text extraction backend
    #[arg(long, value_enum, env = "FORMSCAN_BACKEND", default_value_t = Backend::default())]
    backend: Backend,

    /// Print the configuration instead of writing it
    #[arg(long)]
    stdout: bool,
}

/// Read `input` through `source` and build its field configuration.
pub fn build_config(
    source: &PageSource,
    input: &Path,
    profile: &ExtractionProfile,
) -> Result<(FieldConfig, ExtractionStats)> {
    if !input.exists() {
        return Err(Error::MissingInput(input.to_path_buf()).into());
    }

    let pages = source.read_pages(input)?;
    log::debug!("{}: {} pages", input.display(), pages.len());

    let (fields, stats) = extract_fields_with_stats(pages, profile);
    log::info!(
        "{} pages ({} empty), {} lines: {} catalog, {} fallback, {} duplicate labels, {} rejected, {} duplicate names",
        stats.pages,
        stats.empty_pages,
        stats.lines,
        stats.catalog_matches,
        stats.fallback_matches,
        stats.duplicate_labels,
        stats.rejected_lines,
        stats.duplicate_names,
    );

    Ok((FieldConfig::new(fields, input.display().to_string()), stats))
}

/// Write `contents` to `path` through a temporary file in the same
/// directory, so `path` is either replaced whole or left untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| f!("Failed to create a temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .with_context(|| f!("Failed to write {}", path.display()))?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| f!("Failed to write {}", path.display()))?;

    Ok(())
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let source = PageSource::resolve(app.backend)?;
    let profile = crate::profile::load(app.profile.as_deref())?;

    let (config, _) = build_config(&source, &app.input, &profile)?;
    let json = config.to_json()?;

    if app.stdout {
        println!("{json}");
        eprintln!("Extracted {} fields from PDF", config.fields.len());
        return Ok(());
    }

    write_atomic(&app.output, &f!("{json}\n"))?;

    println!("Extracted {} fields from PDF", config.fields.len());
    println!("Configuration saved to {}", app.output.display());

    Ok(())
}
