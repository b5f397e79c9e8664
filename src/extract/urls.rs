use std::sync::LazyLock;

use regex::Regex;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap());

const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:", "#"];

/// Resolve `url` against `origin` (scheme://host, no trailing slash).
pub fn resolve(url: &str, origin: &str) -> String {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else if SCHEME_RE.is_match(url) {
        url.to_string()
    } else {
        format!("{}/{}", origin, url)
    }
}

/// Values that can never name a fetchable resource.
pub fn is_skipped(raw: &str) -> bool {
    let lower = raw.trim().to_lowercase();
    lower.is_empty() || SKIPPED_PREFIXES.iter().any(|p| lower.starts_with(p))
}
