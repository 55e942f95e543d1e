//! Site building orchestration.
//!
//! One build pass: load the dataset, flatten it, render every page, then
//! write the crawl and search artifacts.
//!
//! ```text
//! build_site()
//!     │
//!     ├── DataSource::load() ──► Some(data) │ None
//!     │
//!     ├── render home / category pages / 404   (degraded home on None)
//!     ├── republish dataset + search index JSON
//!     ├── copy assets, write placeholder icon
//!     └── build_sitemap()
//! ```
//!
//! A load failure never fails the build: the degraded site is the
//! contract, not an error path.

use crate::{
    catalog::{DATASET_FILE, DataSource, ToolsData},
    config::SiteConfig,
    generator::sitemap::build_sitemap,
    log,
    render::{
        PLACEHOLDER_ICON_SVG, render_category, render_degraded, render_home, render_not_found,
    },
    search::{build_index, index_to_json},
    utils::{
        minify::{MinifyType, minify},
        slug::slugify,
    },
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Build the entire site into the output directory.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &'static SiteConfig) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let data = DataSource::from_config(config).load();

    match &data {
        Some(data) => render_catalog(data, config)?,
        None => {
            log!("warn"; "dataset unavailable, rendering degraded site");
            write_page(&output.join("index.html"), &render_degraded(config), config)?;
        }
    }

    // Present in both states: not-found page and the image fallback asset
    write_page(&output.join("404.html"), &render_not_found(config), config)?;
    fs::write(output.join("placeholder-icon.svg"), PLACEHOLDER_ICON_SVG)
        .context("Failed to write placeholder icon")?;

    copy_assets(config)?;
    build_sitemap(config, data.as_ref())?;
    log_build_result(output)
}

/// Render all catalog pages and data artifacts.
fn render_catalog(data: &ToolsData, config: &'static SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let index = build_index(data);

    write_page(
        &output.join("index.html"),
        &render_home(data, &index, config),
        config,
    )?;

    // Category pages are independent of each other
    let categories: Vec<_> = data.categories.iter().collect();
    categories.par_iter().try_for_each(|(slug, category)| {
        let dir = output.join("category").join(slugify(slug));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        write_page(
            &dir.join("index.html"),
            &render_category(slug, category, config),
            config,
        )
    })?;
    log!("render"; "{} category pages", categories.len());

    // Republish the dataset at its well-known path so a deployed site can
    // itself serve as a remote source
    let dataset_json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
    fs::write(output.join(DATASET_FILE), dataset_json)
        .with_context(|| format!("Failed to write {DATASET_FILE}"))?;

    // Flattened index for the client-side search glue
    let index_path = config.search_index_path();
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&index_path, index_to_json(&index))
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    Ok(())
}

/// Minify (per config) and write a rendered page.
fn write_page(path: &Path, html: &str, config: &SiteConfig) -> Result<()> {
    let html = minify(MinifyType::Html(html.as_bytes()), config);
    fs::write(path, &*html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Ensure the output directory exists.
///
/// When `clean` is true, removes all existing content first.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Copy the static assets directory into the output, preserving structure.
fn copy_assets(config: &SiteConfig) -> Result<()> {
    let assets = &config.build.assets;
    if !assets.is_dir() {
        return Ok(());
    }

    let mut copied = 0usize;
    for entry in walkdir::WalkDir::new(assets) {
        let entry = entry.context("Failed to walk assets directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(assets)
            .context("Asset outside assets directory")?;
        let dest = config.build.output.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(entry.path(), &dest)
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied += 1;
    }

    if copied > 0 {
        log!("assets"; "copied {copied} files");
    }
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty");
    } else {
        log!("build"; "done");
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
