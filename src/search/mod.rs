//! Catalog search: flattened index plus substring query filter.
//!
//! The index is rebuilt from scratch whenever a dataset is loaded (the
//! dataset is immutable afterwards, so that is once per process); the
//! filter is a pure synchronous scan over it. See `filter` for the
//! matching contract.

mod filter;
mod index;

pub use filter::{Matches, RESULT_CAP, filter, pricing_matches};
pub use index::{SearchEntry, build_index, index_to_json};

use crate::catalog::DataSource;
use crate::config::SiteConfig;
use anyhow::{Result, bail};

/// Run the `search` subcommand: load the dataset, flatten it and print
/// the tools matching the query.
pub fn run_search(config: &'static SiteConfig, query: &str, pricing: Option<&str>) -> Result<()> {
    let Some(data) = DataSource::from_config(config).load() else {
        bail!("dataset unavailable, nothing to search");
    };

    let index = build_index(&data);

    // Pricing narrows the index before the query runs, so the cap applies
    // to tools the caller can actually use.
    let scoped: Vec<SearchEntry>;
    let searchable: &[SearchEntry] = match pricing {
        Some(tier) => {
            scoped = index
                .iter()
                .filter(|entry| pricing_matches(&entry.tool, tier))
                .cloned()
                .collect();
            &scoped
        }
        None => &index,
    };

    let matches = filter(searchable, query);
    if matches.results.is_empty() {
        println!("no tools matching \"{}\"", query.trim());
        return Ok(());
    }

    for entry in &matches.results {
        println!(
            "{} [{}] - {}",
            entry.tool.name, entry.tool.pricing, entry.category_name
        );
        if !entry.tool.description.is_empty() {
            println!("    {}", entry.tool.description);
        }
        if !entry.tool.url.is_empty() {
            println!("    {}", entry.tool.url);
        }
    }

    if matches.truncated {
        println!("showing top {RESULT_CAP} results");
    }

    Ok(())
}
