pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{ScrapeOptions, ScrapedPage, SearchOptions};

use types::{PageOptions, ScrapeBatchRequest, ScrapeRequest, SearchOptionsWire, SearchRequest};

const BASE_URL: &str = "https://api.firecrawl.dev";

/// Limit applied to a search when the caller supplies none (or zero).
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (self-hosted instances, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Scrape a single URL. One POST to `/scrape`.
    pub async fn scrape_url(&self, url: &str, options: &ScrapeOptions) -> Result<ScrapedPage> {
        let request = ScrapeRequest {
            url: url.to_string(),
            page_options: PageOptions::from(options),
        };

        tracing::info!(url, "Scraping URL");

        let endpoint = format!("{}/scrape", self.base_url);
        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let page: ScrapedPage = serde_json::from_str(&body)?;
        tracing::debug!(url, content_len = page.content_len(), "Scrape complete");

        Ok(page)
    }

    /// Scrape several URLs in one request. Same endpoint, plural payload.
    pub async fn scrape_urls(
        &self,
        urls: &[String],
        options: &ScrapeOptions,
    ) -> Result<Vec<ScrapedPage>> {
        let request = ScrapeBatchRequest {
            urls: urls.to_vec(),
            page_options: PageOptions::from(options),
        };

        tracing::info!(count = urls.len(), "Scraping URL batch");

        let endpoint = format!("{}/scrape", self.base_url);
        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let pages: Vec<ScrapedPage> = serde_json::from_str(&body)?;
        tracing::info!(count = pages.len(), "Batch scrape complete");

        Ok(pages)
    }

    /// Run a search query and scrape each hit. One POST to `/search`.
    pub async fn search_and_scrape(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<ScrapedPage>> {
        let limit = match options.limit {
            Some(n) if n > 0 => n,
            _ => DEFAULT_SEARCH_LIMIT,
        };
        let request = SearchRequest {
            query: query.to_string(),
            page_options: PageOptions::from(&options.page),
            search_options: SearchOptionsWire { limit },
        };

        tracing::info!(query, limit, "Searching and scraping");

        let endpoint = format!("{}/search", self.base_url);
        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let pages: Vec<ScrapedPage> = serde_json::from_str(&body)?;
        tracing::info!(count = pages.len(), "Search complete");

        Ok(pages)
    }
}
