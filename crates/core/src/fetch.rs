//! Content fetching from URLs, files, and stdin.
//!
//! Article pages are fetched through the [`PageFetcher`] trait so the pipeline can
//! run against canned pages in tests. [`HttpFetcher`] is the real implementation;
//! files and stdin carry article JSON for the command line tool.

use std::fs;
use std::future::Future;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{LustreError, Result};

/// User agent of a current desktop Chrome. Some publishers refuse unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client configuration for fetching article pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// Source of article page HTML.
///
/// Any error means "no page this time"; the pipeline never retries.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
///
/// Redirects are followed and the configured timeout covers the whole request.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(LustreError::HttpError)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[cfg(feature = "fetch")]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| LustreError::InvalidUrl(e.to_string()))?;

        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(LustreError::InvalidUrl(format!("unsupported scheme in {url}")));
        }

        tracing::debug!(url, "Fetching article page");

        let timeout = self.config.timeout;
        let response = self
            .client
            .get(parsed_url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| if e.is_timeout() { LustreError::Timeout { timeout } } else { LustreError::HttpError(e) })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LustreError::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }

        let content = response
            .text()
            .await
            .map_err(|e| if e.is_timeout() { LustreError::Timeout { timeout } } else { LustreError::HttpError(e) })?;

        if content.trim().is_empty() {
            return Err(LustreError::EmptyResponse(url.to_string()));
        }

        tracing::debug!(url, bytes = content.len(), "Fetched article page");
        Ok(content)
    }
}

/// Fetches HTML content from a URL with a one-off client.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    HttpFetcher::new(config.clone())?.fetch(url).await
}

/// Reads a local file, typically article JSON.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(LustreError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(LustreError::from)
    }
}

/// Reads standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(LustreError::from)?;

    Ok(buffer)
}
