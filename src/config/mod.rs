//! Site configuration management for `toolshed.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `[base]`  | Site metadata (title, description, url)        |
//! | `[data]`  | Dataset source (embedded, file or remote)      |
//! | `[build]` | Output paths, minify, sitemap, featured count  |
//! | `[serve]` | Preview server (port, interface)               |
//! | `[extra]` | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Design Tools"
//! description = "A curated directory of design tools"
//! url = "https://tools.example.com"
//!
//! [data]
//! strategy = "file"
//! path = "design_tools_database.json"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod data;
mod build;
pub mod defaults;
mod error;
mod serve;

// Re-export public types used by other modules
pub use data::DataStrategy;

// Internal imports used in this module
use base::BaseConfig;
use build::BuildConfig;
use data::DataConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing toolshed.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Dataset source settings
    #[serde(default)]
    pub data: DataConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> Option<&str> {
        self.base.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    /// Output path of the generated sitemap.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    /// Output path of the flattened search index JSON.
    pub fn search_index_path(&self) -> PathBuf {
        self.build.output.join("data").join("search_index.json")
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);
        self.update_path_with_root(&root);

        if let Some(args) = cli.build_args() {
            if args.clean {
                self.build.clean = true;
            }
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
            if let Some(path) = &args.data {
                self.point_data_at_file(path);
            }
        }

        match &cli.command {
            Commands::Serve {
                interface, port, ..
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                self.base.url = Some(format!(
                    "http://{}:{}",
                    self.serve.interface, self.serve.port
                ));
            }
            Commands::Search {
                data: Some(path), ..
            } => {
                self.point_data_at_file(path);
            }
            _ => {}
        }
    }

    /// Switch the dataset source to a file given on the command line.
    fn point_data_at_file(&mut self, path: &Path) {
        self.data.strategy = DataStrategy::File;
        self.data.path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            Self::normalize_path(&self.get_root().join(path))
        };
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.cli.expect("CLI should be set before path update");

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));

        // Normalize dataset path (with tilde expansion)
        if self.data.strategy == DataStrategy::File {
            let expanded = shellexpand::tilde(&self.data.path.to_string_lossy()).into_owned();
            let path = PathBuf::from(expanded);
            self.data.path = if path.is_relative() {
                Self::normalize_path(&root.join(path))
            } else {
                Self::normalize_path(&path)
            };
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        match self.data.strategy {
            DataStrategy::Remote => match &self.data.url {
                None => bail!(ConfigError::Validation(
                    "[data.strategy] = \"remote\" requires [data.url] to be set".into()
                )),
                Some(url) if !url.starts_with("http") => bail!(ConfigError::Validation(
                    "[data.url] must start with http:// or https://".into()
                )),
                _ => {}
            },
            DataStrategy::File | DataStrategy::Embedded => {}
        }

        if self.data.timeout == 0 {
            bail!(ConfigError::Validation(
                "[data.timeout] must be greater than zero".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [base]
            title = "Design Tools"
            description = "A curated directory"
        "#;
        let result = SiteConfig::from_str(config_str);

        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.base.title, "Design Tools");
        assert_eq!(config.base.description, "A curated directory");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [base
            title = "Design Tools"
        "#;
        let result = SiteConfig::from_str(invalid_config);

        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.base.title, "");
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert_eq!(config.serve.port, 4173);
        assert_eq!(config.data.strategy, DataStrategy::Embedded);
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            url = "https://tools.example.com/"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base_url(), Some("https://tools.example.com"));
    }

    #[test]
    fn test_sitemap_path_joins_output() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [build]
            output = "dist"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.sitemap_path(), PathBuf::from("dist/sitemap.xml"));
    }

    #[test]
    fn test_search_index_path() {
        let config = SiteConfig::default();
        assert_eq!(
            config.search_index_path(),
            PathBuf::from("public/data/search_index.json")
        );
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            url = "ftp://tools.example.com"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_remote_requires_url() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [data]
            strategy = "remote"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[data.url]"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [data]
            timeout = 0
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_ok() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_extra_fields() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test directory"

            [extra]
            custom_field = "custom_value"
            number_field = 42
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(
            config.extra.get("custom_field").and_then(|v| v.as_str()),
            Some("custom_value")
        );
        assert_eq!(
            config.extra.get("number_field").and_then(|v| v.as_integer()),
            Some(42)
        );
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            title = "Design Tools"
            description = "A curated directory of design tools"
            url = "https://tools.example.com"
            language = "en-US"

            [data]
            strategy = "file"
            path = "design_tools_database.json"
            timeout = 30

            [build]
            output = "dist"
            minify = true
            clean = false
            featured = 9

            [build.sitemap]
            enable = true
            path = "sitemap.xml"

            [serve]
            interface = "0.0.0.0"
            port = 3000

            [extra]
            analytics_id = "UA-12345"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Design Tools");
        assert_eq!(config.data.strategy, DataStrategy::File);
        assert_eq!(config.data.timeout, 30);
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.featured, 9);
        assert!(config.build.sitemap.enable);
        assert_eq!(config.serve.port, 3000);
        assert!(config.extra.contains_key("analytics_id"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [unknown_section]
            field = "value"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
