//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolshed static directory-site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: toolshed.toml)
    #[arg(short = 'C', long, default_value = "toolshed.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Load the dataset from this JSON file instead of the configured source
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Override base URL for the site.
    ///
    /// Useful for CI/CD deployments where the production URL differs from local
    /// development. This avoids modifying toolshed.toml, keeping the source file
    /// clean.
    ///
    /// Example: toolshed build --base-url "https://tools.example.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the catalog site into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the site, then serve it locally for preview
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search the catalog from the terminal
    Search {
        /// Free-text query, matched against tool names, descriptions and tags
        query: String,

        /// Only show tools whose pricing matches this tier (e.g. free, paid)
        #[arg(long)]
        pricing: Option<String>,

        /// Load the dataset from this JSON file instead of the configured source
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_search(&self) -> bool {
        matches!(self.command, Commands::Search { .. })
    }

    /// Shared build arguments, if the current command carries them.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            Commands::Search { .. } => None,
        }
    }
}
