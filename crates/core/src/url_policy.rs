//! URL derivation and reservation policy for pages.
//!
//! Pure functions: the store stays the authoritative uniqueness guard, this
//! module only decides what a candidate url looks like and which urls are
//! off-limits.

use crate::types::DbId;

/// Urls claimed by the informational routes. No page may use these.
pub const RESERVED_URLS: &[&str] = &["howto", "about"];

/// Whether `url` collides with a system route.
pub fn is_reserved(url: &str) -> bool {
    RESERVED_URLS.contains(&url)
}

/// Derive a url slug from a page title.
///
/// Lowercases, trims surrounding whitespace, collapses each run of interior
/// whitespace into a single underscore, then drops every remaining character
/// that is not alphanumeric or an underscore. An empty or all-whitespace
/// title yields an empty slug.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let trimmed = lowered.trim();

    let mut slug = String::with_capacity(trimmed.len());
    let mut in_whitespace = false;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace {
            slug.push('_');
            in_whitespace = false;
        }
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        }
    }
    slug
}

/// Append the page's own id to its base slug.
///
/// The id makes the url unique without a store round trip, so this is the
/// fallback whenever the user supplies no url of their own.
pub fn auto_url(base_slug: &str, id: DbId) -> String {
    format!("{base_slug}{id}")
}
