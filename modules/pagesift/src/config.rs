use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingKey(&'static str),
}

/// Application configuration loaded once from environment variables.
///
/// Credentials are read here and passed into the client constructors;
/// nothing else in the application touches the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firecrawl credential. Required; without it the application refuses
    /// to start.
    pub firecrawl_api_key: String,

    /// OpenRouter credential. Optional; absence disables AI analysis
    /// instead of failing startup.
    pub openrouter_api_key: Option<String>,

    /// Directory for persisted results, default `data`.
    pub data_dir: PathBuf,

    /// Override for the Firecrawl API base URL (self-hosted instances).
    pub firecrawl_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            firecrawl_api_key: env::var("FIRECRAWL_API_KEY")
                .map_err(|_| ConfigError::MissingKey("FIRECRAWL_API_KEY"))?,
            openrouter_api_key: env::var("OPENROUTER_API_KEY").ok(),
            data_dir: PathBuf::from(
                env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            ),
            firecrawl_base_url: env::var("FIRECRAWL_BASE_URL").ok(),
        })
    }

    pub fn ai_enabled(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}
