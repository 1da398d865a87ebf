//! Slug derivation.
//!
//! Slugs are derived from the English title and used as URL path segments
//! (`/notes/{slug}`) and as content file names (`posts/{slug}.json`).
//!
//! Only ASCII word characters survive, so a title written entirely in Chinese
//! yields an empty slug. Derivation is collision-naive: two titles that differ
//! only in punctuation map to the same slug and nothing here detects that.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Derive a URL-safe slug from a title.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let trimmed = stripped.trim();
    let hyphenated = WHITESPACE.replace_all(trimmed, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
