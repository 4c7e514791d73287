use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use firecrawl_client::FirecrawlClient;
use openrouter_client::OpenRouterClient;
use pagesift::config::Config;
use pagesift::console::Console;
use pagesift::store::ResultStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // stdout belongs to the menu; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Set FIRECRAWL_API_KEY in the environment or in a .env file to get started.");
            return ExitCode::from(1);
        }
    };

    println!("Web Scraper + AI Analyzer");
    println!("Firecrawl API key: configured");
    if config.ai_enabled() {
        println!("OpenRouter API key: configured");
    } else {
        println!("OpenRouter API key: missing (AI features disabled)");
    }

    let mut scraper = FirecrawlClient::new(&config.firecrawl_api_key);
    if let Some(base_url) = &config.firecrawl_base_url {
        scraper = scraper.with_base_url(base_url);
    }
    let analyzer =
        OpenRouterClient::from_key(config.openrouter_api_key.clone()).with_app_name("pagesift");
    let store = ResultStore::new(&config.data_dir);

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin, stdout, scraper, analyzer, store);
    if let Err(e) = console.run().await {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
