//! URL slug normalization for category routes.
//!
//! Dataset keys are usually already slugs (`"icons"`, `"ai-tools"`), but
//! the route layer never assumes that: every key passes through
//! [`slugify`] before it becomes a path segment or a sitemap location, so
//! a key like `"Stock Photos"` still yields a stable `stock-photos` route.

use deunicode::deunicode;

/// Normalize text into a URL-safe slug: ASCII transliteration, lowercase,
/// whitespace and separator runs collapsed to single hyphens.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            // Whitespace, punctuation and path separators all become
            // (at most) one hyphen
            pending_hyphen = true;
        }
    }

    slug
}
