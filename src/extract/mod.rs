pub mod anchors;
pub mod classify;
pub mod media;
pub mod scripts;
pub mod urls;

use std::collections::HashSet;

use reqwest::Client;
use scraper::Html;
use tracing::{info, warn};

use crate::candidate::{fallback_samples, StreamCandidate};
use crate::config::{Config, EmptyPolicy};
use crate::fetch::fetch_page;

/// Fetch the target page and extract stream candidates. Failures are logged
/// and resolved through `config.on_empty`; this never errors.
pub async fn extract_streams(client: &Client, config: &Config) -> Vec<StreamCandidate> {
    let candidates = match fetch_page(client, &config.site_url).await {
        Ok(html) => extract_candidates(&html, &config.origin, &config.placeholder_name()),
        Err(e) => {
            warn!("Error extracting streams: {:#}", e);
            Vec::new()
        }
    };

    info!("Found {} unique stream links", candidates.len());

    if candidates.is_empty() && config.on_empty == EmptyPolicy::UseFallbackSamples {
        warn!("No streams extracted, substituting fallback samples");
        return fallback_samples();
    }
    candidates
}

/// Three passes over one document: media elements → anchors → inline scripts.
pub fn extract_candidates(html: &str, origin: &str, placeholder: &str) -> Vec<StreamCandidate> {
    let document = Html::parse_document(html);
    let mut found = Vec::new();

    media::extract(&document, origin, placeholder, &mut found);
    anchors::extract(&document, origin, &mut found);
    scripts::extract(&document, origin, &mut found);

    dedup(found)
}

/// Keep the first candidate for each URL.
pub fn dedup(candidates: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.url.clone()))
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::candidate::SourceKind;

    const ORIGIN: &str = "https://www.jagobd.com";

    fn fixture(name: &str) -> Vec<StreamCandidate> {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        extract_candidates(&html, ORIGIN, "JagoBD_Stream")
    }

    #[test]
    fn channels_page_urls_in_pass_order() {
        let c = fixture("channels");
        let urls: Vec<&str> = c.iter().map(|x| x.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://embed.tvhost.net/live/channel9",
                "https://www.jagobd.com/media/promo.mp4",
                "https://cdn.tvhost.net/live/channel9.m3u8",
                "https://www.jagobd.com/live/atn-bangla",
                "https://www.jagobd.com/hls/somoy.m3u8",
                "https://cdn.tvhost.net/ch/ekattor/index.m3u8",
            ]
        );
    }

    #[test]
    fn channels_page_names() {
        let c = fixture("channels");
        let names: Vec<&str> = c.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Channel 9",
                "JagoBD_Stream",
                "Channel 9 HD",
                "Channel_4",
                "Somoy TV",
                "Script_Stream_6",
            ]
        );
    }

    #[test]
    fn channels_page_duplicates_keep_earlier_pass() {
        let c = fixture("channels");
        let somoy = c.iter().find(|x| x.url.ends_with("somoy.m3u8")).unwrap();
        assert_eq!(somoy.kind, SourceKind::Link);
        let ch9 = c.iter().find(|x| x.url.ends_with("channel9.m3u8")).unwrap();
        assert_eq!(ch9.kind, SourceKind::Link);
    }

    #[test]
    fn same_url_in_all_passes_kept_once_as_direct() {
        let html = r#"
            <html><body>
              <script>var s = "https://e/s1.m3u8";</script>
              <a href="https://e/s1.m3u8">Anchor</a>
              <embed src="https://e/s1.m3u8" title="Embedded">
            </body></html>"#;
        let c = extract_candidates(html, ORIGIN, "P");
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].kind, SourceKind::Direct);
        assert_eq!(c[0].name, "Embedded");
    }

    #[test]
    fn relative_and_absolute_forms_dedup_after_resolution() {
        let html = r#"
            <a href="/live/a.m3u8">One</a>
            <a href="https://www.jagobd.com/live/a.m3u8">Two</a>"#;
        let c = extract_candidates(html, ORIGIN, "P");
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].name, "One");
    }

    #[test]
    fn object_data_attribute() {
        let html = r#"<object data="/flash/live.flv" alt="Flash Live"></object>"#;
        let c = extract_candidates(html, ORIGIN, "P");
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].url, "https://www.jagobd.com/flash/live.flv");
        assert_eq!(c[0].name, "Flash Live");
    }

    #[test]
    fn page_without_media_yields_nothing() {
        let html = "<html><body><p>Nothing here</p><a href='/about-us'>About</a></body></html>";
        assert!(extract_candidates(html, ORIGIN, "P").is_empty());
    }

    #[test]
    fn malformed_markup_tolerated() {
        let html = "<div><a href='/hls/x.m3u8'>X<div><iframe src='/video/y'";
        let c = extract_candidates(html, ORIGIN, "P");
        assert!(c.iter().any(|x| x.url == "https://www.jagobd.com/hls/x.m3u8"));
    }

    fn unreachable_config(on_empty: EmptyPolicy) -> Config {
        Config {
            on_empty,
            ..Config::new("http://127.0.0.1:1/").unwrap()
        }
    }

    #[tokio::test]
    async fn fetch_failure_yields_empty() {
        let config = unreachable_config(EmptyPolicy::PropagateEmpty);
        let client = crate::fetch::build_client(&config, Duration::from_secs(2)).unwrap();
        assert!(extract_streams(&client, &config).await.is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_yields_samples_when_requested() {
        let config = unreachable_config(EmptyPolicy::UseFallbackSamples);
        let client = crate::fetch::build_client(&config, Duration::from_secs(2)).unwrap();
        assert_eq!(extract_streams(&client, &config).await, fallback_samples());
    }

    #[test]
    fn dedup_first_wins() {
        let input = vec![
            StreamCandidate::new("https://a/1.m3u8", "first", SourceKind::Direct),
            StreamCandidate::new("https://a/2.m3u8", "other", SourceKind::Link),
            StreamCandidate::new("https://a/1.m3u8", "second", SourceKind::Script),
        ];
        let out = dedup(input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "first");
        assert_eq!(out[1].name, "other");
    }
}
