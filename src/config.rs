use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use reqwest::Url;

pub const DEFAULT_SITE_URL: &str = "https://www.jagobd.com/";
pub const DEFAULT_OUTPUT: &str = "playlist.m3u";
pub const DEFAULT_GROUP: &str = "JagoBD";
pub const DEFAULT_MAX_PROBE: usize = 10;
pub const DEFAULT_CONCURRENCY: usize = 8;

/// What to do when extraction or validation leaves nothing to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmptyPolicy {
    /// Write an empty playlist.
    #[default]
    PropagateEmpty,
    /// Substitute the fixed sample channels.
    UseFallbackSamples,
}

/// Settings for a single scrape run.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_url: String,
    /// scheme://host[:port], no trailing slash.
    pub origin: String,
    pub host: String,
    pub group: String,
    /// `None` probes every candidate.
    pub max_probe: Option<usize>,
    pub concurrency: usize,
    pub on_empty: EmptyPolicy,
    pub insecure: bool,
}

impl Config {
    pub fn new(site_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(site_url).with_context(|| format!("Invalid site URL: {}", site_url))?;
        let host = match parsed.host_str() {
            Some(h) => h.to_string(),
            None => bail!("Site URL has no host: {}", site_url),
        };

        Ok(Self {
            site_url: site_url.to_string(),
            origin: parsed.origin().ascii_serialization(),
            host,
            group: DEFAULT_GROUP.to_string(),
            max_probe: Some(DEFAULT_MAX_PROBE),
            concurrency: DEFAULT_CONCURRENCY,
            on_empty: EmptyPolicy::default(),
            insecure: false,
        })
    }

    /// Label for structural candidates without a title or alt attribute.
    pub fn placeholder_name(&self) -> String {
        format!("{}_Stream", self.group)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            origin: "https://www.jagobd.com".to_string(),
            host: "www.jagobd.com".to_string(),
            group: DEFAULT_GROUP.to_string(),
            max_probe: Some(DEFAULT_MAX_PROBE),
            concurrency: DEFAULT_CONCURRENCY,
            on_empty: EmptyPolicy::default(),
            insecure: false,
        }
    }
}
