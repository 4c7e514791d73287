//! Prompt templates for the analysis operations.
//!
//! Each operation wraps user content in a fixed instruction selected by kind;
//! a missing kind falls back to a generic instruction rather than failing.

use serde::{Deserialize, Serialize};

/// What to ask about a single piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Summary,
    Sentiment,
    KeyPoints,
    Qa,
}

/// How to relate two or more pieces of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    Similarities,
    Differences,
    Ranking,
}

pub(crate) fn analysis_prompt(content: &str, kind: Option<AnalysisKind>) -> String {
    let instruction = match kind {
        Some(AnalysisKind::Summary) => {
            "Please provide a concise summary of the following content:"
        }
        Some(AnalysisKind::Sentiment) => {
            "Analyze the sentiment of the following content and provide insights:"
        }
        Some(AnalysisKind::KeyPoints) => {
            "Extract the key points and main ideas from the following content:"
        }
        Some(AnalysisKind::Qa) => "Answer questions about the following content:",
        None => "Analyze the following content:",
    };
    format!("{instruction}\n\n{content}")
}

pub(crate) fn comparison_prompt(contents: &[String], kind: Option<ComparisonKind>) -> String {
    // Inputs are numbered from 1 in the order the caller supplied them.
    let combined = contents
        .iter()
        .enumerate()
        .map(|(index, content)| format!("Content {}:\n{}\n", index + 1, content))
        .collect::<Vec<_>>()
        .join("\n");

    let instruction = match kind {
        Some(ComparisonKind::Similarities) => {
            "Find similarities between the following pieces of content:"
        }
        Some(ComparisonKind::Differences) => {
            "Find differences between the following pieces of content:"
        }
        Some(ComparisonKind::Ranking) => {
            "Rank the following pieces of content by relevance and quality:"
        }
        None => "Compare the following pieces of content:",
    };
    format!("{instruction}\n\n{combined}")
}

pub(crate) fn insights_prompt(data: &[String]) -> String {
    let content = data.join("\n\n");
    format!(
        "Based on the following scraped web content, provide key insights and analysis:\n\n{content}"
    )
}
