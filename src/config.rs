//! Runtime configuration.
//!
//! Settings come from an optional YAML file (`--config`) and are then
//! overridden by command-line flags. Every field has a default, so running
//! without a file is the common case.
//!
//! ```yaml
//! search:
//!   base_url: https://newsapi.org
//!   language: en
//!   sort_by: relevancy
//!   days_before: 1
//! generative:
//!   base_url: https://api.openai.com
//!   model_engine: gpt-3.5-turbo-instruct
//!   max_tokens: 1024
//!   max_results: 5
//! ```

use crate::cli::Cli;
use crate::error::NewsError;
use serde::Deserialize;
use tokio::fs;
use tracing::{info, instrument};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub search: SearchSettings,
    pub generative: GenerativeSettings,
}

/// Settings for the NewsAPI backend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub base_url: String,
    pub language: String,
    pub sort_by: String,
    pub days_before: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            language: "en".to_string(),
            sort_by: "relevancy".to_string(),
            days_before: 1,
        }
    }
}

/// Settings for the OpenAI completions backend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerativeSettings {
    pub base_url: String,
    pub model_engine: String,
    pub max_tokens: u32,
    /// Accepted for completeness; only one candidate is ever requested.
    pub max_results: u32,
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model_engine: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 1024,
            max_results: 5,
        }
    }
}

impl AppConfig {
    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self, NewsError> {
        // An empty file deserializes to `null`, which means "all defaults".
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(s).map_err(|e| NewsError::Config(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, NewsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| NewsError::Config(format!("reading {path}: {e}")))?;
        let config = Self::from_yaml_str(&content)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(language) = &cli.language {
            self.search.language = language.clone();
        }
        if let Some(sort_by) = &cli.sort_by {
            self.search.sort_by = sort_by.clone();
        }
        if let Some(days) = cli.days_before {
            self.search.days_before = days;
        }
        if let Some(model) = &cli.model_engine {
            self.generative.model_engine = model.clone();
        }
        if let Some(max_tokens) = cli.max_tokens {
            self.generative.max_tokens = max_tokens;
        }
        if let Some(max_results) = cli.max_results {
            self.generative.max_results = max_results;
        }
    }
}
