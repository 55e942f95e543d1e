//! Query filter.
//!
//! Case-insensitive substring matching over the flattened index: a tool
//! matches when the query occurs in its name, its description or any of
//! its use-case tags. No tokenization, no fuzzy distance, no relevance
//! scoring; matches keep the index order and are capped at [`RESULT_CAP`].
//!
//! The scan is synchronous on purpose. The index lives fully in memory and
//! a substring pass over a few hundred tools is microseconds, so running
//! it on every keystroke (or request) keeps results consistent with the
//! latest query. A far larger catalog would need an inverted index before
//! it needed asynchrony.

use super::index::SearchEntry;
use crate::catalog::Tool;
use serde::Serialize;

/// Maximum number of results handed to the caller, regardless of how many
/// entries matched.
pub const RESULT_CAP: usize = 8;

/// Filter outcome: capped results in index order, plus whether the cap cut
/// anything off (so callers can render a "showing top N" affordance).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matches<'a> {
    pub results: Vec<&'a SearchEntry>,
    pub truncated: bool,
}

/// Filter the index by a free-text query.
///
/// An empty or whitespace-only query yields no results: search is opt-in,
/// it does not default to "show everything".
pub fn filter<'a>(index: &'a [SearchEntry], query: &str) -> Matches<'a> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Matches {
            results: Vec::new(),
            truncated: false,
        };
    }

    let mut results = Vec::new();
    let mut matched = 0usize;
    for entry in index {
        if !tool_matches(&entry.tool, &query) {
            continue;
        }
        matched += 1;
        if results.len() < RESULT_CAP {
            results.push(entry);
        }
    }

    Matches {
        results,
        truncated: matched > RESULT_CAP,
    }
}

/// Substring containment across the searchable fields.
/// `query` must already be lowercased.
fn tool_matches(tool: &Tool, query: &str) -> bool {
    tool.name.to_lowercase().contains(query)
        || tool.description.to_lowercase().contains(query)
        || tool
            .use_cases
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

/// Pricing-tier narrowing for the CLI (`--pricing free`). Case-insensitive
/// substring, so `free` also matches `FREEMIUM` - the same loose contract
/// the catalog's pricing strings have always had.
pub fn pricing_matches(tool: &Tool, tier: &str) -> bool {
    tool.pricing.to_lowercase().contains(&tier.to_lowercase())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolsData;
    use crate::search::build_index;

    fn entry(name: &str, description: &str, tags: &[&str]) -> SearchEntry {
        SearchEntry {
            tool: Tool {
                name: name.to_string(),
                description: description.to_string(),
                url: format!("https://example.com/{name}"),
                image: String::new(),
                pricing: "FREE".to_string(),
                use_cases: tags.iter().map(|tag| tag.to_string()).collect(),
            },
            category: "icons".to_string(),
            category_name: "Icons".to_string(),
        }
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let index = vec![entry("Acme", "icon maker", &[])];

        let matches = filter(&index, "");
        assert!(matches.results.is_empty());
        assert!(!matches.truncated);
    }

    #[test]
    fn test_whitespace_query_yields_nothing() {
        let index = vec![entry("Acme", "icon maker", &[])];

        let matches = filter(&index, "   \t ");
        assert!(matches.results.is_empty());
        assert!(!matches.truncated);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let index = vec![
            entry("Figma", "interface design", &[]),
            entry("Sketch", "mac design app", &[]),
        ];

        let matches = filter(&index, "fIgMa");
        assert_eq!(matches.results.len(), 1);
        assert_eq!(matches.results[0].tool.name, "Figma");
    }

    #[test]
    fn test_matches_description() {
        let index = vec![
            entry("Acme", "best icon maker", &[]),
            entry("Blot", "color palettes", &[]),
        ];

        let matches = filter(&index, "ICON");
        assert_eq!(matches.results.len(), 1);
        assert_eq!(matches.results[0].tool.name, "Acme");
    }

    #[test]
    fn test_matches_use_case_tags() {
        let index = vec![
            entry("Acme", "drawing", &["Wireframes", "prototyping"]),
            entry("Blot", "drawing", &[]),
        ];

        let matches = filter(&index, "wireframe");
        assert_eq!(matches.results.len(), 1);
        assert_eq!(matches.results[0].tool.name, "Acme");
    }

    #[test]
    fn test_absent_tags_are_skipped_not_an_error() {
        let index = vec![entry("Acme", "icon maker", &[])];

        // Would only match via tags, and there are none
        let matches = filter(&index, "prototyping");
        assert!(matches.results.is_empty());
    }

    #[test]
    fn test_no_partial_field_leakage() {
        // Every returned entry must contain the query in at least one
        // searchable field; every excluded entry in none.
        let index = vec![
            entry("Penpot", "open source design", &["ui"]),
            entry("Krita", "digital painting", &["illustration"]),
            entry("Inkscape", "vector editor", &["svg", "design"]),
        ];

        let matches = filter(&index, "design");
        let returned: Vec<_> = matches
            .results
            .iter()
            .map(|entry| entry.tool.name.as_str())
            .collect();
        assert_eq!(returned, vec!["Penpot", "Inkscape"]);

        for entry in &index {
            let contains = tool_matches(&entry.tool, "design");
            assert_eq!(contains, returned.contains(&entry.tool.name.as_str()));
        }
    }

    #[test]
    fn test_order_is_index_order_no_reranking() {
        // "pen" matches the name of one and descriptions of others; order
        // must stay positional regardless of which field hit.
        let index = vec![
            entry("Alpha", "pen tool tutorials", &[]),
            entry("Penpot", "design platform", &[]),
            entry("Gamma", "supports pen displays", &[]),
        ];

        let names: Vec<_> = filter(&index, "pen")
            .results
            .iter()
            .map(|entry| entry.tool.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Penpot", "Gamma"]);
    }

    #[test]
    fn test_cap_not_reached() {
        let index: Vec<_> = (0..5).map(|i| entry(&format!("tool-{i}"), "match me", &[])).collect();

        let matches = filter(&index, "match");
        assert_eq!(matches.results.len(), 5);
        assert!(!matches.truncated);
    }

    #[test]
    fn test_cap_exactly_reached_is_not_truncated() {
        let index: Vec<_> = (0..RESULT_CAP)
            .map(|i| entry(&format!("tool-{i}"), "match me", &[]))
            .collect();

        let matches = filter(&index, "match");
        assert_eq!(matches.results.len(), RESULT_CAP);
        assert!(!matches.truncated);
    }

    #[test]
    fn test_cap_exceeded_truncates_and_reports() {
        let index: Vec<_> = (0..20).map(|i| entry(&format!("tool-{i}"), "match me", &[])).collect();

        let matches = filter(&index, "match");
        assert_eq!(matches.results.len(), RESULT_CAP);
        assert!(matches.truncated);
        // The first eight, in order
        assert_eq!(matches.results[0].tool.name, "tool-0");
        assert_eq!(matches.results[7].tool.name, "tool-7");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let index = vec![
            entry("Acme", "icon maker", &["icons"]),
            entry("Blot", "pixel icons", &[]),
        ];

        let first = filter(&index, "icon");
        let second = filter(&index, "icon");
        assert_eq!(first, second);
    }

    #[test]
    fn test_unicode_query() {
        let index = vec![entry("Café Palette", "für Farben", &[])];

        assert_eq!(filter(&index, "café").results.len(), 1);
        assert_eq!(filter(&index, "FÜR").results.len(), 1);
    }

    #[test]
    fn test_pricing_matches_loosely() {
        let mut tool = entry("Acme", "", &[]).tool;
        tool.pricing = "FREEMIUM".to_string();

        assert!(pricing_matches(&tool, "free"));
        assert!(pricing_matches(&tool, "FREEMIUM"));
        assert!(!pricing_matches(&tool, "paid"));
    }

    #[test]
    fn test_end_to_end_single_category() {
        let json = r#"{
            "categories": {
                "icons": {
                    "name": "Icons",
                    "description": "d",
                    "tools": [{
                        "name": "Acme",
                        "description": "best icon maker",
                        "url": "https://x",
                        "image": "https://x/i.png",
                        "pricing": "FREE"
                    }]
                }
            }
        }"#;
        let data = ToolsData::from_json(json).unwrap();

        let index = build_index(&data);
        let matches = filter(&index, "icon");

        assert_eq!(matches.results.len(), 1);
        assert_eq!(matches.results[0].tool.name, "Acme");
        assert_eq!(matches.results[0].category, "icons");
        assert_eq!(matches.results[0].category_name, "Icons");
        assert!(!matches.truncated);
    }
}
