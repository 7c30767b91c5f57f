//! HTTP client for Amazon requests using wreq for TLS fingerprint emulation.

use crate::amazon::regions::Region;
use crate::config::Config;
use crate::error::{Error, Result};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// HTTP GET capability - enables mocking for tests.
///
/// Status codes are not inspected: the API answers bad signatures with an
/// error document, and that body is what callers need to see.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Fetches `url` and returns the response body.
    async fn get(&self, url: &str) -> Result<String>;
}

/// Amazon HTTP client with browser impersonation.
pub struct AmazonClient {
    client: Client,
    region: Region,
}

impl AmazonClient {
    /// Creates a new Amazon client with the given configuration.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, region: config.region })
    }

    /// Returns the configured region.
    pub fn region(&self) -> Region {
        self.region
    }
}

#[async_trait]
impl HttpGet for AmazonClient {
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", redact_credentials(url));

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", self.region.accept_language())
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await
            .map_err(|e| Error::Network(format!("request failed: {}", e)))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Amazon answered 503; the body is probably a throttling page.");
        }

        response.text().await.map_err(|e| Error::Network(format!("failed to read body: {}", e)))
    }
}

/// Strips the signature and masks the access key of a signed URL before it
/// is logged.
pub fn redact_credentials(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let pairs: Vec<String> = query
        .split('&')
        .filter_map(|pair| match pair.split_once('=') {
            Some(("Signature", _)) => None,
            Some(("AWSAccessKeyId", _)) => Some("AWSAccessKeyId=<redacted>".to_string()),
            _ => Some(pair.to_string()),
        })
        .collect();

    format!("{}?{}", base, pairs.join("&"))
}
