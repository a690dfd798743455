use std::path::{Path, PathBuf};

use formscan_core::ExtractionProfile;

use crate::prelude::{println, *};

#[derive(Debug, clap::Args)]
pub struct App {
    /// Profile TOML to merge over the built-in profile
    #[arg(long, env = "FORMSCAN_PROFILE")]
    profile: Option<PathBuf>,
}

/// Load the profile at `path`, or the built-in one when no path is given.
pub fn load(path: Option<&Path>) -> Result<ExtractionProfile> {
    let Some(path) = path else {
        return Ok(ExtractionProfile::default());
    };

    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()).into());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| f!("Failed to read profile {}", path.display()))?;
    let profile = ExtractionProfile::from_toml_str(&source)
        .with_context(|| f!("Failed to load profile {}", path.display()))?;

    log::info!(
        "loaded profile {} ({} catalog entries)",
        path.display(),
        profile.catalog.len()
    );
    Ok(profile)
}

/// Print the active profile as TOML.
pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let profile = load(app.profile.as_deref())?;
    println!("{}", profile.to_toml_string()?.trim_end());
    Ok(())
}
