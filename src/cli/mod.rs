//! Command-line interface wiring for chain-compare.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::{
    config::Settings,
    data::source::AnySource,
    pipeline::{catalog::Catalog, PipelineDefaults, Runner},
};

pub mod inspect;
pub mod render;
pub mod serve;
pub mod sources;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Solana vs. Ethereum dashboard preparation", long_about = None)]
pub struct Cli {
    /// JSON metric catalog; overrides METRICS_FILE.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, mut settings: Settings) -> Result<()> {
        if let Some(path) = self.catalog {
            settings.metrics_file = Some(path);
        }
        match self.command {
            Commands::Render(args) => render::run(args, settings).await,
            Commands::Inspect(args) => inspect::run(args, settings).await,
            Commands::Sources => sources::run(settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prepare every metric and write chart specifications to the outputs dir.
    Render(render::Args),
    /// Print a summary of one prepared metric.
    Inspect(inspect::Args),
    /// List local CSV exports and report missing catalog resources.
    Sources,
    /// Serve chart specifications and static assets over HTTP.
    Serve(serve::Args),
}

/// Resolve the catalog and source named by `settings`.
pub fn build_runner(settings: &Settings) -> Result<Runner<AnySource>> {
    let catalog =
        Catalog::resolve(settings.metrics_file.as_deref()).context("loading metric catalog")?;
    let source = AnySource::from_settings(settings).context("configuring csv source")?;
    let defaults = PipelineDefaults {
        cutoff: settings.cutoff,
        window: settings.rolling_window,
    };
    Ok(Runner::new(catalog, source, defaults))
}
