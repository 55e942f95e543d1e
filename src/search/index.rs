//! Search index builder.
//!
//! Flattens the nested category map into a single sequence of tools, each
//! annotated with its owning category. The flattening is a pure function
//! of the dataset: same input, same sequence, order included. No
//! filtering and no deduplication happen here; a tool listed under two
//! categories yields two distinct entries.

use crate::catalog::{Tool, ToolsData};
use serde::Serialize;

/// A tool annotated with its owning category.
///
/// Serializes to the shape the site's search glue consumes: the tool's own
/// fields flattened alongside `category` (slug) and `categoryName`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    #[serde(flatten)]
    pub tool: Tool,

    /// Owning category slug (key in the dataset's `categories` map).
    pub category: String,

    /// Owning category display name.
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

/// Flatten the dataset into search entries, category order then tool order.
pub fn build_index(data: &ToolsData) -> Vec<SearchEntry> {
    let mut entries = Vec::with_capacity(data.tool_count());

    for (slug, category) in data.categories.iter() {
        for tool in &category.tools {
            entries.push(SearchEntry {
                tool: tool.clone(),
                category: slug.to_owned(),
                category_name: category.name.clone(),
            });
        }
    }

    entries
}

/// Serialize the index as pretty JSON for the built site's
/// `data/search_index.json`.
pub fn index_to_json(index: &[SearchEntry]) -> String {
    serde_json::to_string_pretty(index).unwrap_or_else(|_| "[]".to_string())
}

// ============================================================================
// Tests
// ============================================================================
