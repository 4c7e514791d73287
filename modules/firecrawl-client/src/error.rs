use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirecrawlError>;

#[derive(Debug, Error)]
pub enum FirecrawlError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Firecrawl API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FirecrawlError {
    fn from(err: reqwest::Error) -> Self {
        FirecrawlError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FirecrawlError {
    fn from(err: serde_json::Error) -> Self {
        FirecrawlError::Parse(err.to_string())
    }
}
