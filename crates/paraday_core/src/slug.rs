//! Slug generation for manually created ids.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid slug filter regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static DASH_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid dash regex"));

/// Turns a title into a lowercase, dash-separated ASCII slug.
///
/// Characters outside `[A-Za-z0-9_-]` and whitespace are dropped, so a
/// title without any ASCII word characters yields an empty slug.
pub fn slugify(input: &str) -> String {
    let filtered = NON_SLUG_RE.replace_all(input, "");
    let dashed = WHITESPACE_RE.replace_all(filtered.trim(), "-");
    DASH_RUN_RE.replace_all(&dashed, "-").to_ascii_lowercase()
}

/// Returns `base`, or `base-2`, `base-3`, ... until `taken` reports free.
pub fn unique_slug(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
