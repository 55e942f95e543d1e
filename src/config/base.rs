//! `[base]` section configuration.
//!
//! Contains basic site information like title, description and base URL.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in toolshed.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Design Tools"
/// description = "A curated directory of design tools"
/// url = "https://tools.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and headers.
    pub title: String,

    /// Site description for SEO meta tags and the hero section.
    pub description: String,

    /// Base URL for absolute links in the sitemap.
    /// The sitemap is skipped when unset.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}
