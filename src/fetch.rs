use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::info;

use crate::config::Config;

pub const PAGE_TIMEOUT: Duration = Duration::from_secs(30);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Build an HTTP client with browser-like headers and the given timeout.
/// Redirects are followed (reqwest default policy). Accept-Encoding is left to
/// reqwest so compressed bodies are decoded transparently.
pub fn build_client(config: &Config, timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .default_headers(browser_headers())
        .timeout(timeout)
        .danger_accept_invalid_certs(config.insecure)
        .build()
        .context("Failed to build HTTP client")?;
    Ok(client)
}

/// GET the target page and return its body. Non-2xx responses are errors.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info!("Fetching {}", url);
    let start = Instant::now();

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Bad status from {}", url))?;

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;

    info!(
        "Fetched {} bytes in {}ms",
        body.len(),
        start.elapsed().as_millis()
    );
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_headers_leave_encoding_to_client() {
        let headers = browser_headers();
        assert!(headers[header::USER_AGENT].to_str().unwrap().starts_with("Mozilla/5.0"));
        assert!(headers.contains_key(header::ACCEPT_LANGUAGE));
        assert!(!headers.contains_key(header::ACCEPT_ENCODING));
        assert!(!headers.contains_key(header::CONNECTION));
    }
}
