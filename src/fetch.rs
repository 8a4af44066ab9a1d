// src/fetch.rs
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Retrieves raw page content. `None` means "nothing usable this cycle" —
/// callers skip the source and leave stored state untouched.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// reqwest-backed fetcher with a browser-like identity header and a bounded
/// timeout. Transport errors and non-success statuses are logged here and
/// never surface to the caller.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    async fn fetch_inner(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let resp = resp.error_for_status().context("non-success status")?;
        resp.text().await.context("read body")
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.fetch_inner(url).await {
            Ok(body) if body.is_empty() => {
                tracing::warn!(url, "fetch returned empty body, skipping");
                None
            }
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url, "fetch failed: {e:#}");
                None
            }
        }
    }
}
