use std::sync::LazyLock;

use regex::Regex;

/// Substrings that mark a URL as a likely media stream. Matched against the
/// lowercased URL; false positives are filtered later by probing.
pub const STREAM_KEYWORDS: &[&str] = &[
    "m3u8", "mp4", "ts", "flv", "avi", "mkv", "stream", "live", "hls", "video", "rtmp://",
    "rtsp://",
];

/// Patterns applied to inline script text. Where a pattern has a capture
/// group, group 1 is the URL; otherwise the whole match is.
pub const SCRIPT_URL_PATTERNS: &[&str] = &[
    r#"(?i)https?://[^\s"']+\.m3u8[^\s"']*"#,
    r#"(?i)https?://[^\s"']+\.mp4[^\s"']*"#,
    r#"(?i)https?://[^\s"']+\.ts[^\s"']*"#,
    r#"(?i)file\s*[=:]\s*["']([^"']+)["']"#,
    r#"(?i)src\s*[=:]\s*["']([^"']+)["']"#,
];

pub static SCRIPT_URL_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SCRIPT_URL_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub fn is_stream_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    STREAM_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
