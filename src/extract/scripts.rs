use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::classify::{is_stream_url, SCRIPT_URL_RES};
use super::urls::{is_skipped, resolve};
use crate::candidate::{SourceKind, StreamCandidate};

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").unwrap());

/// Script-text pass over inline `<script>` blocks. Matches are emitted pattern
/// by pattern, in match order within each block.
pub fn extract(document: &Html, origin: &str, out: &mut Vec<StreamCandidate>) {
    for script in document.select(&SCRIPT_SELECTOR) {
        let content: String = script.text().collect();
        if content.trim().is_empty() {
            continue;
        }
        scan_text(&content, origin, out);
    }
}

fn scan_text(content: &str, origin: &str, out: &mut Vec<StreamCandidate>) {
    for re in SCRIPT_URL_RES.iter() {
        for caps in re.captures_iter(content) {
            let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
                continue;
            };
            let raw = m.as_str();
            if is_skipped(raw) || !is_stream_url(raw) {
                continue;
            }
            out.push(StreamCandidate::new(
                resolve(raw, origin),
                format!("Script_Stream_{}", out.len() + 1),
                SourceKind::Script,
            ));
        }
    }
}
