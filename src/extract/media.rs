use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::classify::is_stream_url;
use super::urls::{is_skipped, resolve};
use crate::candidate::{SourceKind, StreamCandidate};

static MEDIA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("video, iframe, embed, object, source").unwrap());

/// Structural pass: media elements with a `src` (or `data` on `<object>`).
pub fn extract(document: &Html, origin: &str, placeholder: &str, out: &mut Vec<StreamCandidate>) {
    for element in document.select(&MEDIA_SELECTOR) {
        let el = element.value();
        let src = el
            .attr("src")
            .or_else(|| if el.name() == "object" { el.attr("data") } else { None });

        let Some(src) = src.filter(|s| !is_skipped(s)) else {
            continue;
        };

        let url = resolve(src, origin);
        if !is_stream_url(&url) {
            continue;
        }

        let name = ["title", "alt"]
            .iter()
            .filter_map(|attr| el.attr(*attr))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(placeholder);

        out.push(StreamCandidate::new(url, name, SourceKind::Direct));
    }
}
