use serde::{Deserialize, Serialize};

// --- Caller-facing option types ---

/// Page rendering options shared by every scrape and search request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrapeOptions {
    pub only_main_content: bool,
    pub include_html: bool,
    pub screenshot: bool,
}

/// Options for a search-and-scrape request.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub page: ScrapeOptions,
    /// Maximum number of results. A missing or zero value falls back to
    /// `DEFAULT_SEARCH_LIMIT`.
    pub limit: Option<u32>,
}

// --- Wire types ---

/// The nested `pageOptions` object carried by every request body.
#[derive(Debug, Clone, Serialize)]
pub struct PageOptions {
    #[serde(rename = "onlyMainContent")]
    pub only_main_content: bool,
    #[serde(rename = "includeHtml")]
    pub include_html: bool,
    pub screenshot: bool,
}

impl From<&ScrapeOptions> for PageOptions {
    fn from(options: &ScrapeOptions) -> Self {
        Self {
            only_main_content: options.only_main_content,
            include_html: options.include_html,
            screenshot: options.screenshot,
        }
    }
}

/// Body for a single-URL POST to /scrape.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(rename = "pageOptions")]
    pub page_options: PageOptions,
}

/// Body for a multi-URL POST to /scrape. Same endpoint, plural payload.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeBatchRequest {
    pub urls: Vec<String>,
    #[serde(rename = "pageOptions")]
    pub page_options: PageOptions,
}

/// Body for a POST to /search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "pageOptions")]
    pub page_options: PageOptions,
    #[serde(rename = "searchOptions")]
    pub search_options: SearchOptionsWire,
}

/// The nested `searchOptions` object of a search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOptionsWire {
    pub limit: u32,
}

/// One scraped page as returned by the API.
///
/// Known fields are typed; anything else the API sends lands in `extra` so
/// that re-serializing a page reproduces the full raw response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ScrapedPage {
    /// Length of the markdown content in characters, zero when absent.
    pub fn content_len(&self) -> usize {
        self.markdown.as_deref().map(|m| m.chars().count()).unwrap_or(0)
    }

    /// Title for display, empty string when absent.
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
