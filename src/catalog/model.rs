//! Typed data model for the design-tools dataset.
//!
//! The dataset is a single JSON document: catalog metadata plus a mapping
//! from category slug to category. It is parsed once at the load boundary
//! and treated as immutable for the rest of the process lifetime; nothing
//! downstream ever sees an untyped value.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Tool & Category
// ============================================================================

/// One catalog entry: a third-party design resource.
///
/// `name` plus position is the only usable identity; names are not
/// guaranteed unique within or across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Display name.
    pub name: String,

    /// Short description shown on cards and matched by search.
    #[serde(default)]
    pub description: String,

    /// External link to the tool itself.
    #[serde(default)]
    pub url: String,

    /// Icon/logo URL or path. May be broken; rendering substitutes a
    /// placeholder on load failure.
    #[serde(default)]
    pub image: String,

    /// Pricing tier. `FREE`, `FREEMIUM` or `PAID` in practice, but
    /// free-form in the source data.
    #[serde(default)]
    pub pricing: String,

    /// Use-case tags, matched by search. Optional in the source data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_cases: Vec<String>,
}

/// A named group of tools. Tool order is the display order; the first N
/// tools of the flattened catalog become the home page "featured" strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Display name (e.g. "AI Tools").
    pub name: String,

    /// Short description shown on the category card and listing page.
    #[serde(default)]
    pub description: String,

    /// Tools in display order.
    #[serde(default)]
    pub tools: Vec<Tool>,
}

// ============================================================================
// Catalog Metadata
// ============================================================================

/// Dataset-level metadata.
///
/// `total_tools` is advisory only: the scrape that produced the dataset may
/// have drifted from the per-category contents. Display surfaces must use
/// [`ToolsData::tool_count`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogMeta {
    pub source: String,
    pub created_date: String,
    pub total_tools: u64,
    pub description: String,
}

// ============================================================================
// Ordered Category Map
// ============================================================================

/// Mapping from category slug to category, in JSON document order.
///
/// Category order is meaningful (it drives the featured strip and the
/// flattened search index), so this cannot be a `HashMap`/`BTreeMap`.
/// Duplicate slugs keep the last occurrence, matching `JSON.parse`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categories(Vec<(String, Category)>);

impl Categories {
    /// Look up a category by slug.
    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.0
            .iter()
            .find(|(key, _)| key == slug)
            .map(|(_, category)| category)
    }

    /// Iterate (slug, category) pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.0.iter().map(|(slug, category)| (slug.as_str(), category))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Category)> for Categories {
    fn from_iter<I: IntoIterator<Item = (String, Category)>>(iter: I) -> Self {
        let mut categories = Self::default();
        for (slug, category) in iter {
            categories.insert(slug, category);
        }
        categories
    }
}

impl Categories {
    /// Insert preserving first-seen position; a duplicate slug replaces the
    /// earlier value in place.
    fn insert(&mut self, slug: String, category: Category) {
        match self.0.iter_mut().find(|(key, _)| *key == slug) {
            Some(entry) => entry.1 = category,
            None => self.0.push((slug, category)),
        }
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (slug, category) in &self.0 {
            map.serialize_entry(slug, category)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = Categories;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category slug to category")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut categories = Categories::default();
                while let Some((slug, category)) = map.next_entry::<String, Category>()? {
                    categories.insert(slug, category);
                }
                Ok(categories)
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}

// ============================================================================
// Dataset Root
// ============================================================================

/// The entire dataset. Read-only at runtime; the system never writes back
/// to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsData {
    #[serde(default)]
    pub meta: CatalogMeta,

    #[serde(default)]
    pub categories: Categories,
}

impl ToolsData {
    /// Parse a dataset from JSON text.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Actual tool count, recomputed from the categories.
    ///
    /// `meta.total_tools` is advisory and may drift; this is the number
    /// every display surface uses.
    pub fn tool_count(&self) -> usize {
        self.categories
            .iter()
            .map(|(_, category)| category.tools.len())
            .sum()
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
