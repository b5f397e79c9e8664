use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::classify::is_stream_url;
use super::urls::{is_skipped, resolve};
use crate::candidate::{SourceKind, StreamCandidate};

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Anchor pass. The raw href is classified before resolution so the site's
/// own host name never tips a plain link into a match.
pub fn extract(document: &Html, origin: &str, out: &mut Vec<StreamCandidate>) {
    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if is_skipped(href) || !is_stream_url(href) {
            continue;
        }

        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let name = if text.is_empty() {
            format!("Channel_{}", out.len() + 1)
        } else {
            text
        };

        out.push(StreamCandidate::new(resolve(href, origin), name, SourceKind::Link));
    }
}
