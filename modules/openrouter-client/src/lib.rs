pub mod outcome;
pub mod prompt;
mod types;

pub use outcome::AnalysisOutcome;
pub use prompt::{AnalysisKind, ComparisonKind};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use types::{ChatRequest, ChatResponse, WireMessage};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

/// Model pinned for every completion request.
const MODEL: &str = "anthropic/claude-3.5-sonnet";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

/// Chat-completion client with an explicit disabled mode.
///
/// Constructed with a credential it talks to OpenRouter; constructed without
/// one, every operation short-circuits to [`AnalysisOutcome::Disabled`] — the
/// disabled client holds no HTTP machinery at all. No operation ever returns
/// an error: request-level failures are ordinary [`AnalysisOutcome`] values.
pub struct OpenRouterClient {
    mode: Mode,
}

enum Mode {
    Enabled {
        http: reqwest::Client,
        api_key: String,
        base_url: String,
        app_name: Option<String>,
        site_url: Option<String>,
    },
    Disabled,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            mode: Mode::Enabled {
                http: reqwest::Client::new(),
                api_key: api_key.into(),
                base_url: OPENROUTER_API_URL.to_string(),
                app_name: None,
                site_url: None,
            },
        }
    }

    /// Client with AI features switched off.
    pub fn disabled() -> Self {
        Self { mode: Mode::Disabled }
    }

    /// Pick the mode from an optional credential.
    pub fn from_key(api_key: Option<String>) -> Self {
        match api_key {
            Some(key) => Self::new(key),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.mode, Mode::Enabled { .. })
    }

    /// Override the API base URL (tests, proxies). No effect when disabled.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        if let Mode::Enabled { ref mut base_url, .. } = self.mode {
            *base_url = url.into().trim_end_matches('/').to_string();
        }
        self
    }

    /// App name sent as the `X-Title` attribution header.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        if let Mode::Enabled { ref mut app_name, .. } = self.mode {
            *app_name = Some(name.into());
        }
        self
    }

    /// Site URL sent as the `HTTP-Referer` attribution header.
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        if let Mode::Enabled { ref mut site_url, .. } = self.mode {
            *site_url = Some(url.into());
        }
        self
    }

    /// Analyze one piece of content; `None` uses the generic instruction.
    pub async fn analyze(&self, content: &str, kind: Option<AnalysisKind>) -> AnalysisOutcome {
        self.complete(prompt::analysis_prompt(content, kind)).await
    }

    /// Compare two or more pieces of content, numbered in input order.
    pub async fn compare(
        &self,
        contents: &[String],
        kind: Option<ComparisonKind>,
    ) -> AnalysisOutcome {
        self.complete(prompt::comparison_prompt(contents, kind)).await
    }

    /// Derive key insights from one or more scraped content blocks.
    pub async fn generate_insights(&self, data: &[String]) -> AnalysisOutcome {
        self.complete(prompt::insights_prompt(data)).await
    }

    /// One POST to `/chat/completions` with the fixed request shape.
    async fn complete(&self, prompt: String) -> AnalysisOutcome {
        let Mode::Enabled {
            http,
            api_key,
            base_url,
            app_name,
            site_url,
        } = &self.mode
        else {
            return AnalysisOutcome::Disabled;
        };

        let headers = match build_headers(api_key, app_name.as_deref(), site_url.as_deref()) {
            Ok(headers) => headers,
            Err(e) => return AnalysisOutcome::RequestError(e.to_string()),
        };

        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![WireMessage::user(prompt)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(model = MODEL, "OpenRouter chat request");

        let url = format!("{base_url}/chat/completions");
        let resp = match http.post(&url).headers(headers).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => return AnalysisOutcome::RequestError(e.to_string()),
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return AnalysisOutcome::ApiError {
                status: status.as_u16(),
                body,
            };
        }

        let response: ChatResponse = match resp.json().await {
            Ok(response) => response,
            Err(e) => return AnalysisOutcome::RequestError(e.to_string()),
        };

        match response.content() {
            Some(text) => AnalysisOutcome::Text(text),
            None => AnalysisOutcome::Empty,
        }
    }
}

fn build_headers(
    api_key: &str,
    app_name: Option<&str>,
    site_url: Option<&str>,
) -> Result<HeaderMap, reqwest::header::InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(url) = site_url {
        if let Ok(value) = HeaderValue::from_str(url) {
            headers.insert("HTTP-Referer", value);
        }
    }

    if let Some(name) = app_name {
        if let Ok(value) = HeaderValue::from_str(name) {
            headers.insert("X-Title", value);
        }
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_disabled_client_short_circuits_every_operation() {
        let client = OpenRouterClient::disabled();
        assert!(!client.is_enabled());

        let analyze = client.analyze("text", Some(AnalysisKind::Summary)).await;
        assert_eq!(analyze, AnalysisOutcome::Disabled);

        let contents = vec!["a".to_string(), "b".to_string()];
        let compare = client.compare(&contents, Some(ComparisonKind::Ranking)).await;
        assert_eq!(compare, AnalysisOutcome::Disabled);

        let insights = client.generate_insights(&["data".to_string()]).await;
        assert_eq!(insights, AnalysisOutcome::Disabled);
    }

    #[test]
    fn test_from_key_picks_the_mode() {
        assert!(OpenRouterClient::from_key(Some("or-test".to_string())).is_enabled());
        assert!(!OpenRouterClient::from_key(None).is_enabled());
    }

    #[tokio::test]
    async fn test_analyze_posts_fixed_request_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer or-test"))
            .and(body_json(json!({
                "model": "anthropic/claude-3.5-sonnet",
                "messages": [{
                    "role": "user",
                    "content": "Please provide a concise summary of the following content:\n\nsome text"
                }],
                "max_tokens": 2000,
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "a summary" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::new("or-test").with_base_url(server.uri());
        let outcome = client.analyze("some text", Some(AnalysisKind::Summary)).await;
        assert_eq!(outcome, AnalysisOutcome::Text("a summary".to_string()));
    }

    #[tokio::test]
    async fn test_attribution_headers_are_sent_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("X-Title", "pagesift"))
            .and(header("HTTP-Referer", "https://example.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::new("or-test")
            .with_base_url(server.uri())
            .with_app_name("pagesift")
            .with_site_url("https://example.org");
        let outcome = client.analyze("text", None).await;
        assert_eq!(outcome, AnalysisOutcome::Text("ok".to_string()));
    }

    #[tokio::test]
    async fn test_http_error_becomes_api_error_outcome() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new("or-test").with_base_url(server.uri());
        let outcome = client.analyze("text", Some(AnalysisKind::Sentiment)).await;
        assert_eq!(
            outcome,
            AnalysisOutcome::ApiError {
                status: 500,
                body: "upstream exploded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_response_without_content_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new("or-test").with_base_url(server.uri());
        let outcome = client.generate_insights(&["data".to_string()]).await;
        assert_eq!(outcome, AnalysisOutcome::Empty);
        assert_eq!(outcome.to_string(), "No response content");
    }

    #[tokio::test]
    async fn test_malformed_body_is_request_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = OpenRouterClient::new("or-test").with_base_url(server.uri());
        let contents = vec!["a".to_string(), "b".to_string()];
        let outcome = client.compare(&contents, None).await;
        assert!(matches!(outcome, AnalysisOutcome::RequestError(_)));
    }
}
