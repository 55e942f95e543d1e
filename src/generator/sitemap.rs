//! Sitemap generation.
//!
//! Generates a sitemap.xml listing the home route plus one route per
//! category, for search engine indexing. When the dataset failed to load
//! only the home route is listed; the sitemap never fails the build.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    catalog::ToolsData,
    config::SiteConfig,
    log,
    utils::{
        minify::{MinifyType, minify},
        slug::slugify,
    },
};
use anyhow::{Context, Result};
use std::fs;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
///
/// Requires `[base.url]`; absolute locations are mandatory in a sitemap, so
/// without it generation is skipped with a warning rather than failing.
pub fn build_sitemap(config: &'static SiteConfig, data: Option<&ToolsData>) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }
    let Some(base_url) = config.base_url() else {
        log!("warn"; "[base.url] not set, skipping sitemap");
        return Ok(());
    };

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let sitemap = Sitemap::from_catalog(base_url, data, &today);
    sitemap.write(config)
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD format)
    lastmod: String,
    /// Crawler revisit hint
    changefreq: &'static str,
    /// Relative crawl priority
    priority: &'static str,
}

impl Sitemap {
    /// Build the route list: home first, then one route per category in
    /// document order. `data = None` (load failure) lists home alone.
    fn from_catalog(base_url: &str, data: Option<&ToolsData>, lastmod: &str) -> Self {
        let mut urls = vec![UrlEntry {
            loc: format!("{base_url}/"),
            lastmod: lastmod.to_string(),
            changefreq: "daily",
            priority: "1.0",
        }];

        if let Some(data) = data {
            urls.extend(data.categories.iter().map(|(slug, _)| UrlEntry {
                loc: format!("{base_url}/category/{}/", slugify(slug)),
                lastmod: lastmod.to_string(),
                changefreq: "weekly",
                priority: "0.8",
            }));
        }

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq
            ));
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, config: &'static SiteConfig) -> Result<()> {
        let sitemap_path = config.sitemap_path();
        let count = self.urls.len();
        let xml = self.into_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{} routes", count);
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
