use std::fmt;

/// What one analysis operation produced.
///
/// The client never fails at the call level: HTTP errors, transport failures
/// and the disabled mode all come back as variants here, so callers branch on
/// the variant while the `Display` impl renders the exact line the console
/// prints and persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The model replied with text.
    Text(String),
    /// Well-formed response carrying no content.
    Empty,
    /// The client was constructed without a credential; no request was made.
    Disabled,
    /// Non-success HTTP status from the completion endpoint.
    ApiError { status: u16, body: String },
    /// The request never completed: connect failure, or an unreadable body.
    RequestError(String),
}

impl fmt::Display for AnalysisOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisOutcome::Text(text) => f.write_str(text),
            AnalysisOutcome::Empty => f.write_str("No response content"),
            AnalysisOutcome::Disabled => f.write_str(
                "AI analysis is disabled. Please configure your OPENROUTER_API_KEY.",
            ),
            AnalysisOutcome::ApiError { status, body } => {
                write!(f, "API Error: {status} - {body}")
            }
            AnalysisOutcome::RequestError(message) => {
                write!(f, "Error calling OpenRouter API: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_variant_renders_its_contract_line() {
        assert_eq!(AnalysisOutcome::Text("a reply".into()).to_string(), "a reply");
        assert_eq!(AnalysisOutcome::Empty.to_string(), "No response content");
        assert_eq!(
            AnalysisOutcome::Disabled.to_string(),
            "AI analysis is disabled. Please configure your OPENROUTER_API_KEY."
        );
        assert_eq!(
            AnalysisOutcome::ApiError {
                status: 429,
                body: "{\"error\":\"rate limited\"}".into()
            }
            .to_string(),
            "API Error: 429 - {\"error\":\"rate limited\"}"
        );
        assert_eq!(
            AnalysisOutcome::RequestError("connection refused".into()).to_string(),
            "Error calling OpenRouter API: connection refused"
        );
    }
}
