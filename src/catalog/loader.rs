//! Dataset loading.
//!
//! Resolves the design-tools dataset from one of three interchangeable
//! sources: the copy bundled into the binary, a local JSON file, or an
//! HTTP location. Loading never raises: every failure is logged and
//! collapsed to `None`, and callers render a degraded/empty site instead
//! of crashing.
//!
//! There is no caching across calls. `build` loads once per invocation,
//! `serve` once per process.

use crate::config::{DataStrategy, SiteConfig};
use crate::{catalog::ToolsData, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::PathBuf, time::Duration};

// ============================================================================
// Constants
// ============================================================================

/// Well-known file name of the dataset, both as an input (`file` strategy
/// default) and as republished into the built site for the `remote`
/// strategy to point at.
pub const DATASET_FILE: &str = "design_tools_database.json";

/// Dataset bundled at compile time for the `embedded` strategy.
const EMBEDDED_DATASET: &str = include_str!("../embed/design_tools.json");

// ============================================================================
// Data Source
// ============================================================================

/// A resolved dataset source.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Dataset compiled into the binary.
    Embedded,
    /// Local JSON file.
    File(PathBuf),
    /// HTTP location, fetched with an explicit timeout.
    Remote { url: String, timeout: Duration },
}

impl DataSource {
    /// Pick the source selected by `[data]` in the config.
    pub fn from_config(config: &SiteConfig) -> Self {
        match config.data.strategy {
            DataStrategy::Embedded => Self::Embedded,
            DataStrategy::File => Self::File(config.data.path.clone()),
            DataStrategy::Remote => Self::Remote {
                url: config.data.url.clone().unwrap_or_default(),
                timeout: Duration::from_secs(config.data.timeout),
            },
        }
    }

    /// Load and parse the dataset.
    ///
    /// Returns `None` on any failure (I/O error, non-success status,
    /// timeout, malformed JSON). The failure is logged here; it is never
    /// propagated as an error.
    pub fn load(&self) -> Option<ToolsData> {
        let loaded = match self {
            Self::Embedded => parse_dataset(EMBEDDED_DATASET).context("embedded dataset"),
            Self::File(path) => load_file(path),
            Self::Remote { url, timeout } => fetch_remote(url, *timeout),
        };

        match loaded {
            Ok(data) => {
                log!("data"; "{} tools in {} categories", data.tool_count(), data.category_count());
                Some(data)
            }
            Err(err) => {
                log!("error"; "failed to load dataset: {err:#}");
                None
            }
        }
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn parse_dataset(content: &str) -> Result<ToolsData> {
    ToolsData::from_json(content).context("dataset is not valid JSON for the catalog shape")
}

fn load_file(path: &std::path::Path) -> Result<ToolsData> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_dataset(&content)
}

fn fetch_remote(url: &str, timeout: Duration) -> Result<ToolsData> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("requesting {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("request to {url} returned {status}");
    }

    let body = response.text().context("reading response body")?;
    parse_dataset(&body)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_DATASET: &str = r#"{
        "meta": {"source": "test", "created_date": "2025-01-01", "total_tools": 2, "description": ""},
        "categories": {
            "icons": {
                "name": "Icons",
                "description": "icon sets",
                "tools": [
                    {"name": "Acme", "description": "best icon maker", "url": "https://x", "image": "https://x/i.png", "pricing": "FREE"},
                    {"name": "Blot", "description": "pixel icons", "url": "https://y", "image": "https://y/i.png", "pricing": "PAID"}
                ]
            }
        }
    }"#;

    #[test]
    fn test_embedded_dataset_parses() {
        let data = DataSource::Embedded.load().expect("bundled dataset must be well-formed");
        assert!(data.tool_count() > 0);
        assert!(!data.categories.is_empty());
    }

    #[test]
    fn test_file_strategy_loads_valid_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_DATASET.as_bytes()).unwrap();

        let data = DataSource::File(file.path().to_path_buf()).load().unwrap();
        assert_eq!(data.tool_count(), 2);
        assert_eq!(data.categories.get("icons").unwrap().tools[0].name, "Acme");
    }

    #[test]
    fn test_file_strategy_malformed_json_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        assert!(DataSource::File(file.path().to_path_buf()).load().is_none());
    }

    #[test]
    fn test_file_strategy_missing_file_is_none() {
        let source = DataSource::File(PathBuf::from("/nonexistent/design_tools_database.json"));
        assert!(source.load().is_none());
    }

    #[test]
    fn test_remote_strategy_unreachable_is_none() {
        // Port 9 (discard) is not listening; connection is refused locally,
        // so this does not depend on network access.
        let source = DataSource::Remote {
            url: "http://127.0.0.1:9/design_tools_database.json".to_string(),
            timeout: Duration::from_millis(500),
        };
        assert!(source.load().is_none());
    }

    #[test]
    fn test_from_config_default_is_embedded() {
        let config = SiteConfig::default();
        assert!(matches!(
            DataSource::from_config(&config),
            DataSource::Embedded
        ));
    }

    #[test]
    fn test_from_config_file_strategy() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [data]
            strategy = "file"
            path = "tools.json"
        "#,
        )
        .unwrap();

        match DataSource::from_config(&config) {
            DataSource::File(path) => assert_eq!(path, PathBuf::from("tools.json")),
            other => panic!("expected file source, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_remote_strategy_carries_timeout() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [data]
            strategy = "remote"
            url = "https://tools.example.com/design_tools_database.json"
            timeout = 3
        "#,
        )
        .unwrap();

        match DataSource::from_config(&config) {
            DataSource::Remote { url, timeout } => {
                assert_eq!(url, "https://tools.example.com/design_tools_database.json");
                assert_eq!(timeout, Duration::from_secs(3));
            }
            other => panic!("expected remote source, got {other:?}"),
        }
    }
}
