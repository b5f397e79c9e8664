use std::future::Future;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::candidate::{fallback_samples, StreamCandidate};
use crate::config::{Config, EmptyPolicy};

/// Statuses that count as a live stream. Redirect codes only show up when
/// the redirect chain itself ends on one.
pub const KEEP_STATUSES: &[u16] = &[200, 206, 301, 302];

/// Hosts that only ever serve sample data. Never probed.
const PLACEHOLDER_HOSTS: &[&str] = &["example.com", "example.org", "example.net", "localhost"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    Timeout,
    Error(String),
}

impl ProbeOutcome {
    pub fn is_working(&self) -> bool {
        matches!(self, ProbeOutcome::Status(s) if KEEP_STATUSES.contains(s))
    }
}

/// A header-only existence check against one URL.
pub trait Probe: Send + Sync {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send;
}

/// HEAD requests through a reqwest client (timeout and redirect policy come
/// from the client).
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send {
        let request = self.client.head(url);
        async move {
            match request.send().await {
                Ok(resp) => ProbeOutcome::Status(resp.status().as_u16()),
                Err(e) if e.is_timeout() => ProbeOutcome::Timeout,
                Err(e) => ProbeOutcome::Error(e.to_string()),
            }
        }
    }
}

pub fn is_placeholder_url(url: &str) -> bool {
    let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_lowercase)) else {
        return false;
    };
    PLACEHOLDER_HOSTS
        .iter()
        .any(|p| host == *p || host.ends_with(&format!(".{}", p)))
}

/// Probe candidates in input order and keep the ones that answer with a
/// `KEEP_STATUSES` code. At most `config.max_probe` probes are issued, at most
/// `config.concurrency` at a time; output order is input order.
pub async fn validate_streams<P: Probe>(
    prober: &P,
    candidates: Vec<StreamCandidate>,
    config: &Config,
) -> Result<Vec<StreamCandidate>> {
    let mut eligible: Vec<StreamCandidate> = candidates
        .into_iter()
        .filter(|c| {
            let placeholder = is_placeholder_url(&c.url);
            if placeholder {
                debug!("Skipping placeholder URL {}", c.url);
            }
            !placeholder
        })
        .collect();
    if let Some(cap) = config.max_probe {
        eligible.truncate(cap);
    }

    info!("Testing {} links...", eligible.len());

    let pb = ProgressBar::new(eligible.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let pb_ref = &pb;
    let outcomes: Vec<ProbeOutcome> = stream::iter(eligible.iter())
        .map(|c| async move {
            let outcome = prober.probe(&c.url).await;
            match &outcome {
                o if o.is_working() => info!("✓ Working: {}", c.name),
                ProbeOutcome::Status(s) => warn!("✗ Not working ({}): {}", s, c.name),
                ProbeOutcome::Timeout => warn!("✗ Timeout: {}", c.name),
                ProbeOutcome::Error(e) => warn!("✗ Error: {} - {}", c.name, crate::truncate(e, 50)),
            }
            pb_ref.inc(1);
            outcome
        })
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    pb.finish_and_clear();

    let working: Vec<StreamCandidate> = eligible
        .into_iter()
        .zip(outcomes)
        .filter(|(_, o)| o.is_working())
        .map(|(c, _)| c)
        .collect();

    info!("{} working links", working.len());

    if working.is_empty() && config.on_empty == EmptyPolicy::UseFallbackSamples {
        warn!("No working streams, substituting fallback samples");
        return Ok(fallback_samples());
    }
    Ok(working)
}

// ── Tests ──
