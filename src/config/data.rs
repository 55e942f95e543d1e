//! `[data]` section configuration.
//!
//! Selects where the design-tools dataset comes from. The three strategies
//! are interchangeable: each resolves to the same typed catalog, and each
//! failure mode degrades to an empty site rather than an error.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dataset source strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStrategy {
    /// Use the dataset bundled into the binary at compile time (default).
    #[default]
    Embedded,
    /// Read the dataset from a local JSON file (`[data.path]`).
    File,
    /// Fetch the dataset over HTTP (`[data.url]`).
    Remote,
}

/// `[data]` section in toolshed.toml - dataset source settings.
///
/// # Example
/// ```toml
/// [data]
/// strategy = "remote"
/// url = "https://tools.example.com/design_tools_database.json"
/// timeout = 15
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Which source to load the dataset from.
    #[serde(default)]
    pub strategy: DataStrategy,

    /// Dataset file path for the `file` strategy (tilde-expanded,
    /// relative to the project root).
    #[serde(default = "defaults::data::path")]
    #[educe(Default = defaults::data::path())]
    pub path: PathBuf,

    /// Dataset URL for the `remote` strategy.
    #[serde(default = "defaults::data::url")]
    #[educe(Default = defaults::data::url())]
    pub url: Option<String>,

    /// Request timeout in seconds for the `remote` strategy.
    /// Expiry counts as a load failure.
    #[serde(default = "defaults::data::timeout")]
    #[educe(Default = defaults::data::timeout())]
    pub timeout: u64,
}
