//! Cache-first page fetching.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cache::Cache;

/// Sent with every request so the crawl is attributable.
pub const USER_AGENT: &str = concat!("hookscrape/", env!("CARGO_PKG_VERSION"));

pub struct Fetcher<'a> {
    cache: &'a Cache,
    client: reqwest::Client,
}

impl<'a> Fetcher<'a> {
    pub fn new(cache: &'a Cache) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("building http client")?;
        Ok(Fetcher { cache, client })
    }

    /// Text for `key`, fetching `url` and filling the cache on a miss.
    pub async fn text(&self, key: &str, url: &str) -> Result<String> {
        if let Some(text) = self.cache.get(key) {
            debug!(key, "cache hit");
            return Ok(text);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting {}", url))?
            .error_for_status()
            .with_context(|| format!("fetching {}", url))?;
        let text = response.text().await.context("reading response body")?;

        self.cache.put(key, &text)?;
        info!(key, "fetched");
        Ok(text)
    }
}
