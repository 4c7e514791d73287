//! The interactive menu loop.
//!
//! `Console` is generic over its input and output handles so integration
//! tests can drive a full session through in-memory buffers. Each menu
//! action performs exactly one client call and persists at most one record
//! before the menu is shown again.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use firecrawl_client::{FirecrawlClient, ScrapeOptions, SearchOptions};
use openrouter_client::{AnalysisKind, ComparisonKind, OpenRouterClient};

use crate::store::ResultStore;

const SEPARATOR_WIDTH: usize = 50;

#[derive(Serialize)]
struct AnalysisRecord {
    analysis_kind: AnalysisKind,
    result: String,
}

#[derive(Serialize)]
struct ComparisonRecord {
    comparison_kind: ComparisonKind,
    result: String,
}

#[derive(Serialize)]
struct InsightsRecord {
    insights: String,
}

pub struct Console<R, W> {
    input: R,
    out: W,
    scraper: FirecrawlClient,
    analyzer: OpenRouterClient,
    store: ResultStore,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        input: R,
        out: W,
        scraper: FirecrawlClient,
        analyzer: OpenRouterClient,
        store: ResultStore,
    ) -> Self {
        Self {
            input,
            out,
            scraper,
            analyzer,
            store,
        }
    }

    /// Run the menu loop until the user quits (or stdin reaches EOF).
    ///
    /// Action failures print one `Error:` line and return control to the
    /// menu; nothing short of quit terminates the loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = read_trimmed_line(&mut self.input)? else {
                break;
            };

            let result = match choice.to_lowercase().as_str() {
                "1" => self.scrape_single().await,
                "2" => self.scrape_multiple().await,
                "3" => self.search_and_scrape().await,
                "4" => self.analyze_content().await,
                "5" => self.compare_content().await,
                "6" => self.generate_insights().await,
                "q" | "quit" | "exit" => {
                    writeln!(self.out, "Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                writeln!(self.out, "Error: {e}")?;
            }
            writeln!(self.out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Available Options:")?;
        writeln!(self.out, "1. Scrape single URL")?;
        writeln!(self.out, "2. Scrape multiple URLs")?;
        writeln!(self.out, "3. Search and scrape")?;
        writeln!(self.out, "4. Analyze content")?;
        writeln!(self.out, "5. Compare content")?;
        writeln!(self.out, "6. Generate insights")?;
        writeln!(self.out, "q. Quit")?;
        writeln!(self.out)?;
        write!(self.out, "Enter your choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    async fn scrape_single(&mut self) -> Result<()> {
        let url = self.prompt("Enter URL to scrape: ")?;
        if url.is_empty() {
            writeln!(self.out, "No URL entered.")?;
            return Ok(());
        }
        let include_html = self.prompt_yes_no("Include HTML? (y/n): ")?;
        let screenshot = self.prompt_yes_no("Take screenshot? (y/n): ")?;

        writeln!(self.out, "Scraping URL...")?;
        let options = ScrapeOptions {
            only_main_content: false,
            include_html,
            screenshot,
        };
        let page = self.scraper.scrape_url(&url, &options).await?;

        writeln!(self.out, "Successfully scraped!")?;
        writeln!(self.out, "Title: {}", page.title_or_empty())?;
        writeln!(self.out, "Content length: {} characters", page.content_len())?;
        self.persist(&page, "single_url")?;
        Ok(())
    }

    async fn scrape_multiple(&mut self) -> Result<()> {
        writeln!(self.out, "Enter URLs one per line (blank line to finish):")?;
        let mut urls = Vec::new();
        while let Some(line) = read_trimmed_line(&mut self.input)? {
            if line.is_empty() {
                break;
            }
            urls.push(line);
        }
        if urls.is_empty() {
            writeln!(self.out, "No URLs entered.")?;
            return Ok(());
        }

        writeln!(self.out, "Scraping {} URLs...", urls.len())?;
        let pages = self.scraper.scrape_urls(&urls, &ScrapeOptions::default()).await?;

        writeln!(self.out, "Successfully scraped {} URLs!", pages.len())?;
        for (index, page) in pages.iter().enumerate() {
            writeln!(self.out, "{}. {} - {}", index + 1, page.url, page.title_or_empty())?;
        }
        self.persist(&pages, "multiple_urls")?;
        Ok(())
    }

    async fn search_and_scrape(&mut self) -> Result<()> {
        let query = self.prompt("Enter search query: ")?;
        if query.is_empty() {
            writeln!(self.out, "No query entered.")?;
            return Ok(());
        }
        let limit_input = self.prompt("Number of results (default 10): ")?;
        let options = SearchOptions {
            limit: parse_limit(&limit_input),
            ..Default::default()
        };

        writeln!(self.out, "Searching and scraping...")?;
        let pages = self.scraper.search_and_scrape(&query, &options).await?;

        writeln!(self.out, "Found {} results!", pages.len())?;
        for (index, page) in pages.iter().enumerate() {
            writeln!(self.out, "{}. {} - {}", index + 1, page.url, page.title_or_empty())?;
        }
        self.persist(&pages, "search")?;
        Ok(())
    }

    async fn analyze_content(&mut self) -> Result<()> {
        writeln!(self.out, "Enter content to analyze (press Enter twice when done):")?;
        let content = read_block(&mut self.input)?;
        if content.trim().is_empty() {
            writeln!(self.out, "No content entered.")?;
            return Ok(());
        }

        writeln!(self.out, "Analysis types:")?;
        writeln!(self.out, "1. Summary")?;
        writeln!(self.out, "2. Sentiment")?;
        writeln!(self.out, "3. Key points")?;
        writeln!(self.out, "4. Q&A")?;
        let choice = self.prompt("Choose analysis type (1-4): ")?;
        let kind = match choice.as_str() {
            "2" => AnalysisKind::Sentiment,
            "3" => AnalysisKind::KeyPoints,
            "4" => AnalysisKind::Qa,
            _ => AnalysisKind::Summary,
        };

        writeln!(self.out, "Analyzing content...")?;
        let outcome = self.analyzer.analyze(&content, Some(kind)).await;
        let result = outcome.to_string();

        writeln!(self.out, "Analysis Result:")?;
        writeln!(self.out, "{result}")?;
        self.persist(
            &AnalysisRecord {
                analysis_kind: kind,
                result,
            },
            "analysis",
        )?;
        Ok(())
    }

    async fn compare_content(&mut self) -> Result<()> {
        writeln!(self.out, "Enter first content (press Enter twice when done):")?;
        let first = read_block(&mut self.input)?;
        writeln!(self.out, "Enter second content (press Enter twice when done):")?;
        let second = read_block(&mut self.input)?;
        if first.trim().is_empty() || second.trim().is_empty() {
            writeln!(self.out, "Both content blocks are required.")?;
            return Ok(());
        }

        writeln!(self.out, "Comparison types:")?;
        writeln!(self.out, "1. Similarities")?;
        writeln!(self.out, "2. Differences")?;
        writeln!(self.out, "3. Ranking")?;
        let choice = self.prompt("Choose comparison type (1-3): ")?;
        let kind = match choice.as_str() {
            "2" => ComparisonKind::Differences,
            "3" => ComparisonKind::Ranking,
            _ => ComparisonKind::Similarities,
        };

        writeln!(self.out, "Comparing content...")?;
        let outcome = self.analyzer.compare(&[first, second], Some(kind)).await;
        let result = outcome.to_string();

        writeln!(self.out, "Comparison Result:")?;
        writeln!(self.out, "{result}")?;
        self.persist(
            &ComparisonRecord {
                comparison_kind: kind,
                result,
            },
            "comparison",
        )?;
        Ok(())
    }

    async fn generate_insights(&mut self) -> Result<()> {
        writeln!(self.out, "Enter scraped data or content (press Enter twice when done):")?;
        let content = read_block(&mut self.input)?;
        if content.trim().is_empty() {
            writeln!(self.out, "No content entered.")?;
            return Ok(());
        }

        writeln!(self.out, "Generating insights...")?;
        let outcome = self.analyzer.generate_insights(&[content]).await;
        let insights = outcome.to_string();

        writeln!(self.out, "Insights:")?;
        writeln!(self.out, "{insights}")?;
        self.persist(&InsightsRecord { insights }, "insights")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(read_trimmed_line(&mut self.input)?.unwrap_or_default())
    }

    fn prompt_yes_no(&mut self, text: &str) -> Result<bool> {
        Ok(self.prompt(text)?.eq_ignore_ascii_case("y"))
    }

    /// Persist one record under `<category>_<unixSeconds>` and report where
    /// it went.
    fn persist<T: Serialize>(&mut self, record: &T, category: &str) -> Result<()> {
        let stem = format!("{category}_{}", Utc::now().timestamp());
        let path = self.store.save(record, &stem)?;
        writeln!(self.out, "Result saved to {}", path.display())?;
        Ok(())
    }
}

/// Read one line, stripped of its trailing newline and surrounding
/// whitespace. `None` on EOF.
fn read_trimmed_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read one line with only the line ending removed, keeping inner and
/// leading whitespace. `None` on EOF.
fn read_raw_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Read a multi-line block terminated by two consecutive blank lines.
///
/// A single blank line inside otherwise non-blank text is kept as part of
/// the content; the block ends only when a blank line follows a line that
/// was already blank. The trailing blank is dropped from the result, so
/// input `a, "", b, "", ""` yields `"a\n\nb"`.
fn read_block(input: &mut impl BufRead) -> std::io::Result<String> {
    let mut lines: Vec<String> = Vec::new();
    while let Some(line) = read_raw_line(input)? {
        if line.is_empty() && lines.last().is_some_and(|last| last.is_empty()) {
            lines.pop();
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn parse_limit(input: &str) -> Option<u32> {
    match input.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn block_from(lines: &[&str]) -> String {
        let mut input = lines.join("\n");
        input.push('\n');
        read_block(&mut Cursor::new(input)).unwrap()
    }

    #[test]
    fn test_read_block_keeps_single_embedded_blank_line() {
        // Two blanks in a row terminate; the single blank between a and b
        // survives into the content.
        assert_eq!(block_from(&["a", "", "b", "", ""]), "a\n\nb");
    }

    #[test]
    fn test_read_block_stops_at_double_blank() {
        assert_eq!(block_from(&["a", "b", "", "", "never read"]), "a\nb");
    }

    #[test]
    fn test_read_block_eof_terminates() {
        assert_eq!(block_from(&["a", "b"]), "a\nb");
    }

    #[test]
    fn test_read_block_preserves_leading_whitespace() {
        assert_eq!(block_from(&["  indented", "plain", "", ""]), "  indented\nplain");
    }

    #[test]
    fn test_read_block_blank_only_input_is_empty() {
        assert_eq!(block_from(&["", ""]), "");
        assert_eq!(block_from(&[]), "");
    }

    #[test]
    fn test_read_trimmed_line_handles_eof() {
        let mut input = Cursor::new("one\n");
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("one"));
        assert_eq!(read_trimmed_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("5"), Some(5));
        assert_eq!(parse_limit("0"), None);
        assert_eq!(parse_limit("-3"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("ten"), None);
    }
}
