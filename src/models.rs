//! Data models shared by the provider adapters and the renderer.
//!
//! This module defines:
//! - [`QueryParameters`]: the common, backend-agnostic request parameters
//! - [`Category`]: the closed set of prompt categories for the generative path
//! - [`SearchResponse`]: the NewsAPI "everything" response, articles kept opaque
//! - [`CompletionResponse`]: the OpenAI completions response
//! - [`Articles`]: the uniform result returned to the orchestrator

use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An article record as returned by the search backend.
///
/// The shape is backend-defined and passed through untouched.
pub type Article = serde_json::Map<String, serde_json::Value>;

/// Common request parameters accepted by both adapters.
///
/// The keyword list is never empty; use [`QueryParameters::new`] to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    keywords: Vec<String>,
    /// Source identifiers to restrict the search to.
    pub sources: Vec<String>,
    /// Domains to restrict the search to.
    pub domains: Vec<String>,
    /// How many days before today the search window starts.
    pub days_before: u32,
    /// Language code passed through to the backend.
    pub language: String,
    /// Sort strategy passed through to the backend.
    pub sort_by: String,
}

impl QueryParameters {
    pub const DEFAULT_DAYS_BEFORE: u32 = 1;
    pub const DEFAULT_LANGUAGE: &'static str = "en";
    pub const DEFAULT_SORT_BY: &'static str = "relevancy";

    /// Build parameters with defaults for every optional field.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::EmptyQuery`] if `keywords` is empty.
    pub fn new<I, S>(keywords: I) -> Result<Self, NewsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if keywords.is_empty() {
            return Err(NewsError::EmptyQuery);
        }
        Ok(Self {
            keywords,
            sources: Vec::new(),
            domains: Vec::new(),
            days_before: Self::DEFAULT_DAYS_BEFORE,
            language: Self::DEFAULT_LANGUAGE.to_string(),
            sort_by: Self::DEFAULT_SORT_BY.to_string(),
        })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Prompt category for the generative backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    People,
    Trend,
    History,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::People, Category::Trend, Category::History];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Trend => "trend",
            Category::History => "history",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NewsError;

    /// Matching is exact: `"Trend"` is rejected just like `"nonsense"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| NewsError::InvalidCategory(s.to_string()))
    }
}

/// Response of the NewsAPI "everything" endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// `"ok"` on success.
    #[serde(default)]
    pub status: String,
    /// Total number of matches the backend knows about (not the page size).
    #[serde(default)]
    pub total_results: u64,
    /// Article records in backend order.
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Response of the OpenAI completions endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// Text of the first candidate, if the backend returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.text.as_str())
    }

    /// First candidate split on line boundaries.
    pub fn lines(&self) -> Vec<&str> {
        self.first_text()
            .map(|t| t.lines().collect())
            .unwrap_or_default()
    }
}

/// Uniform result handed back to the orchestrator.
#[derive(Debug, Clone)]
pub enum Articles {
    Search(SearchResponse),
    Generated(CompletionResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameters_defaults() {
        let params = QueryParameters::new(["mode", "fashion"]).unwrap();
        assert_eq!(params.keywords(), ["mode", "fashion"]);
        assert!(params.sources.is_empty());
        assert!(params.domains.is_empty());
        assert_eq!(params.days_before, 1);
        assert_eq!(params.language, "en");
        assert_eq!(params.sort_by, "relevancy");
    }

    #[test]
    fn test_query_parameters_rejects_empty_keywords() {
        let err = QueryParameters::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, NewsError::EmptyQuery));
    }

    #[test]
    fn test_category_parses_closed_set() {
        assert_eq!("people".parse::<Category>().unwrap(), Category::People);
        assert_eq!("trend".parse::<Category>().unwrap(), Category::Trend);
        assert_eq!("history".parse::<Category>().unwrap(), Category::History);
    }

    #[test]
    fn test_category_rejects_unknown_values() {
        for bad in ["nonsense", "", "Trend", " trend"] {
            match bad.parse::<Category>() {
                Err(NewsError::InvalidCategory(v)) => assert_eq!(v, bad),
                other => panic!("expected InvalidCategory for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_search_response_keeps_unknown_article_fields() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "A", "source": {"id": null, "name": "Vogue"}, "extra": 1},
                {"title": "B"}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total_results, 2);
        assert_eq!(resp.articles.len(), 2);
        assert_eq!(resp.articles[0]["extra"], 1);
        assert_eq!(resp.articles[0]["source"]["name"], "Vogue");
        assert_eq!(resp.articles[1]["title"], "B");
    }

    #[test]
    fn test_completion_lines_use_first_choice() {
        let resp = CompletionResponse {
            id: None,
            model: None,
            choices: vec![
                CompletionChoice {
                    text: "\n1. Linen is back\n2. Quiet luxury".to_string(),
                    ..Default::default()
                },
                CompletionChoice {
                    text: "ignored".to_string(),
                    ..Default::default()
                },
            ],
        };
        assert_eq!(resp.lines(), vec!["", "1. Linen is back", "2. Quiet luxury"]);
    }

    #[test]
    fn test_completion_lines_empty_without_choices() {
        let resp = CompletionResponse::default();
        assert!(resp.first_text().is_none());
        assert!(resp.lines().is_empty());
    }
}
