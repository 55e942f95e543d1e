//! Page rendering.
//!
//! Renders the catalog into HTML using templates embedded at compile time,
//! with `{placeholder}` substitution. One renderer per page kind: home
//! (hero, featured strip, category grid), category listing, not-found and
//! the degraded page shown when no dataset could be loaded.
//!
//! All dataset-derived text is HTML-escaped here. Scalar placeholders are
//! substituted before card fragments so card content is never re-scanned
//! for placeholders.

use crate::catalog::{Category, Tool, ToolsData};
use crate::config::SiteConfig;
use crate::search::SearchEntry;
use crate::utils::{html::escape, slug::slugify};

// ============================================================================
// Constants - Embedded Templates
// ============================================================================

const HOME_TEMPLATE: &str = include_str!("../embed/templates/home.html");
const CATEGORY_TEMPLATE: &str = include_str!("../embed/templates/category.html");
const NOT_FOUND_TEMPLATE: &str = include_str!("../embed/templates/not_found.html");
const DEGRADED_TEMPLATE: &str = include_str!("../embed/templates/degraded.html");

/// URL of the placeholder icon inside the built site.
pub const PLACEHOLDER_ICON: &str = "/placeholder-icon.svg";

/// The placeholder icon itself, written into the output at build time.
pub const PLACEHOLDER_ICON_SVG: &str = include_str!("../embed/assets/placeholder-icon.svg");

/// Hero fallbacks when `[base]` is left empty.
const DEFAULT_TITLE: &str = "Discover Amazing Design Tools";
const DEFAULT_DESCRIPTION: &str =
    "A curated collection of the best design tools, resources and inspiration \
     to supercharge your creative workflow";

// ============================================================================
// Page Renderers
// ============================================================================

/// Render the home page: hero with recomputed counts, featured strip
/// (positional prefix of the flattened index) and the category grid.
pub fn render_home(data: &ToolsData, index: &[SearchEntry], config: &SiteConfig) -> String {
    let featured_cards: String = index
        .iter()
        .take(config.build.featured)
        .map(featured_card)
        .collect();

    let category_cards: String = data
        .categories
        .iter()
        .map(|(slug, category)| category_card(slug, category))
        .collect();

    HOME_TEMPLATE
        .replace("{language}", &escape(&config.base.language))
        .replace("{title}", &escape(site_title(config)))
        .replace("{description}", &escape(site_description(config)))
        .replace("{tool_count}", &data.tool_count().to_string())
        .replace("{category_count}", &data.category_count().to_string())
        .replace("{featured_cards}", &featured_cards)
        .replace("{category_cards}", &category_cards)
}

/// Render one category listing page.
pub fn render_category(slug: &str, category: &Category, config: &SiteConfig) -> String {
    // An empty display name in the dataset falls back to the slug
    let name = if category.name.is_empty() {
        slug
    } else {
        &category.name
    };

    let tool_cards: String = category.tools.iter().map(tool_card).collect();

    CATEGORY_TEMPLATE
        .replace("{language}", &escape(&config.base.language))
        .replace("{site_title}", &escape(site_title(config)))
        .replace("{category_name}", &escape(name))
        .replace("{category_description}", &escape(&category.description))
        .replace("{tool_count}", &category.tools.len().to_string())
        .replace("{icon}", category_icon(slug))
        .replace("{tool_cards}", &tool_cards)
}

/// Render the not-found page, served for unknown routes and slugs.
pub fn render_not_found(config: &SiteConfig) -> String {
    NOT_FOUND_TEMPLATE
        .replace("{language}", &escape(&config.base.language))
        .replace("{site_title}", &escape(site_title(config)))
}

/// Render the degraded home page used when no dataset could be loaded.
pub fn render_degraded(config: &SiteConfig) -> String {
    DEGRADED_TEMPLATE
        .replace("{language}", &escape(&config.base.language))
        .replace("{site_title}", &escape(site_title(config)))
}

// ============================================================================
// Card Fragments
// ============================================================================

fn featured_card(entry: &SearchEntry) -> String {
    let tool = &entry.tool;
    format!(
        r#"<div class="card">{image}<h3><a href="{url}" target="_blank" rel="noopener noreferrer">{name}</a></h3><span class="badge {badge}">{pricing}</span><p>{description}</p><p class="count"><a href="/category/{slug}/">in {category}</a></p></div>"#,
        image = tool_image(tool),
        url = escape(&tool.url),
        name = escape(&tool.name),
        badge = pricing_class(&tool.pricing),
        pricing = escape(&tool.pricing),
        description = escape(&tool.description),
        slug = slugify(&entry.category),
        category = escape(&entry.category_name),
    )
}

fn category_card(slug: &str, category: &Category) -> String {
    let name = if category.name.is_empty() {
        slug
    } else {
        &category.name
    };
    format!(
        r#"<a class="card" href="/category/{route}/"><h3><span class="icon">{icon}</span>{name}</h3><p>{description}</p><span class="count">{count} tools</span></a>"#,
        route = slugify(slug),
        icon = category_icon(slug),
        name = escape(name),
        description = escape(&category.description),
        count = category.tools.len(),
    )
}

fn tool_card(tool: &Tool) -> String {
    let tags: String = tool
        .use_cases
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape(tag)))
        .collect();
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="tags">{tags}</div>"#)
    };

    format!(
        r#"<div class="card">{image}<h3><a href="{url}" target="_blank" rel="noopener noreferrer">{name}</a></h3><span class="badge {badge}">{pricing}</span><p>{description}</p>{tags}</div>"#,
        image = tool_image(tool),
        url = escape(&tool.url),
        name = escape(&tool.name),
        badge = pricing_class(&tool.pricing),
        pricing = escape(&tool.pricing),
        description = escape(&tool.description),
    )
}

/// Tool icon with one-shot fallback: on load failure the handler clears
/// itself and swaps in the placeholder, so a broken placeholder cannot
/// retry forever.
fn tool_image(tool: &Tool) -> String {
    let src = if tool.image.is_empty() {
        PLACEHOLDER_ICON
    } else {
        &tool.image
    };
    format!(
        r#"<img src="{src}" alt="{alt} icon" loading="lazy" onerror="this.onerror=null;this.src='{PLACEHOLDER_ICON}'">"#,
        src = escape(src),
        alt = escape(&tool.name),
    )
}

// ============================================================================
// Presentation Helpers
// ============================================================================

fn site_title(config: &SiteConfig) -> &str {
    if config.base.title.is_empty() {
        DEFAULT_TITLE
    } else {
        &config.base.title
    }
}

fn site_description(config: &SiteConfig) -> &str {
    if config.base.description.is_empty() {
        DEFAULT_DESCRIPTION
    } else {
        &config.base.description
    }
}

/// CSS class for a pricing badge. Unknown tiers style like paid.
fn pricing_class(pricing: &str) -> &'static str {
    match pricing.to_ascii_lowercase().as_str() {
        "free" => "free",
        "freemium" => "freemium",
        _ => "paid",
    }
}

/// Emoji shown next to a category name.
pub fn category_icon(slug: &str) -> &'static str {
    match slug {
        "inspiration" => "🎨",
        "illustrations" => "🖼️",
        "icons" => "✨",
        "mockups" => "📱",
        "typography" => "🔤",
        "stock-photos" => "📸",
        "learning" => "📚",
        "blogs" => "📝",
        "podcasts" => "🎙️",
        "books" => "📖",
        "accessibility" => "♿",
        "community" => "👥",
        "ai-tools" => "🤖",
        "design-tools" => "🛠️",
        "ux-tools" => "🔍",
        "color-tools" => "🎨",
        "project-tools" => "📋",
        "web-builder" => "🌐",
        _ => "🔧",
    }
}

// ============================================================================
// Tests
// ============================================================================
