use crate::prelude::*;
use clap::Parser;

mod error;
mod extract;
mod prelude;
mod profile;
mod show;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn printed form documents into field configurations"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "FORMSCAN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Extract form fields from a document into a field configuration
    Extract(crate::extract::App),

    /// Print a field configuration grouped into form sections
    Show(crate::show::App),

    /// Print the active extraction profile as TOML
    Profile(crate::profile::App),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    let default_filter = if app.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match app.command {
        SubCommands::Extract(sub_app) => crate::extract::run(sub_app, app.global),
        SubCommands::Show(sub_app) => crate::show::run(sub_app, app.global),
        SubCommands::Profile(sub_app) => crate::profile::run(sub_app, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
