//! Toolshed - a static site generator for a curated design-tools directory.

mod build;
mod catalog;
mod cli;
mod config;
mod generator;
mod render;
mod search;
mod serve;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use search::run_search;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build { .. } => build_site(config),
        Commands::Serve { .. } => {
            build_site(config)?;
            serve_site(config)
        }
        Commands::Search { query, pricing, .. } => run_search(config, query, pricing.as_deref()),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: the defaults (embedded dataset,
/// `public/` output) describe a fully working site.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
