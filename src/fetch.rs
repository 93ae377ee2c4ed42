//! HTTP fetch task backed by reqwest.
//!
//! The production [`Task`] implementation for URL-list jobs: each
//! parameter is a URL, each output is the decoded response body. Pair it
//! with a domain-specific [`Converter`](crate::Converter) to turn pages
//! into structured records.

use std::time::Duration;

use async_trait::async_trait;

use crate::task::Task;

/// Configuration for [`FetchTask`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: concat!("volley/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Task that GETs a URL and returns the response body as text.
///
/// Character decoding follows the response headers (reqwest's `text()`),
/// so non-UTF-8 pages come back correctly decoded. Non-2xx statuses are
/// errors: an error page is not a result a converter can use.
#[derive(Clone)]
pub struct FetchTask {
    client: reqwest::Client,
    config: FetchConfig,
}

impl FetchTask {
    /// Create a fetch task with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    /// Create a fetch task with a custom configuration.
    pub fn with_config(config: FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// The configuration this task was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl Default for FetchTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Task for FetchTask {
    type Param = String;
    type Output = String;

    #[tracing::instrument(skip(self, url), fields(url = %url))]
    async fn execute(&self, url: &String) -> anyhow::Result<String> {
        tracing::debug!(timeout_ms = self.config.timeout_ms, "fetching url");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, body_len = body.len(), "fetch completed");
        Ok(body)
    }
}
