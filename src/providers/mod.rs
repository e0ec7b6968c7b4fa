//! Article providers and provider selection.
//!
//! Two interchangeable backends sit behind the [`ArticleSource`] capability:
//!
//! | Kind | Module | Backend | Request |
//! |------|--------|---------|---------|
//! | `search` | [`newsapi`] | NewsAPI `/v2/everything` | keywords, filters, date window |
//! | `generative` | [`openai`] | OpenAI `/v1/completions` | category prompt over the keywords |
//!
//! [`select_provider`] runs once at startup. It reads the selector token,
//! loads the credentials the chosen backend needs and returns an
//! [`ActiveProvider`] that the orchestrator consumes for its single request.

pub mod newsapi;
pub mod openai;

use crate::config::AppConfig;
use crate::credentials::{GenerativeCredentials, SearchCredentials};
use crate::error::NewsError;
use crate::models::{Articles, QueryParameters};
use newsapi::{NewsApiClient, SearchAdapter, SearchBackend};
use openai::{CompletionBackend, GenerativeAdapter, OpenAiClient};
use std::fmt;
use tracing::{debug, info, instrument};

/// Selector token that activates the search backend.
pub const SEARCH_TOKEN: &str = "n";

/// Which backend is active for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Search,
    Generative,
}

impl ProviderKind {
    /// Map the selector token to a backend. Unrecognized or absent tokens
    /// fall back to the generative backend.
    pub fn from_selector(token: Option<&str>) -> Self {
        match token {
            Some(SEARCH_TOKEN) => ProviderKind::Search,
            _ => ProviderKind::Generative,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Search => write!(f, "search"),
            ProviderKind::Generative => write!(f, "generative"),
        }
    }
}

/// Parameters for one article request.
///
/// `category` is only read by the generative backend and is validated there.
#[derive(Debug, Clone)]
pub struct ArticleRequest {
    pub params: QueryParameters,
    pub category: String,
}

/// Fetch articles given the common request parameters.
pub trait ArticleSource {
    fn kind(&self) -> ProviderKind;

    async fn fetch_articles(&self, request: &ArticleRequest) -> Result<Articles, NewsError>;
}

/// The backend selected at startup.
pub enum ActiveProvider<S = NewsApiClient, G = OpenAiClient> {
    Search(SearchAdapter<S>),
    Generative(GenerativeAdapter<G>),
}

impl<S, G> ArticleSource for ActiveProvider<S, G>
where
    S: SearchBackend,
    G: CompletionBackend,
{
    fn kind(&self) -> ProviderKind {
        match self {
            ActiveProvider::Search(a) => a.kind(),
            ActiveProvider::Generative(a) => a.kind(),
        }
    }

    async fn fetch_articles(&self, request: &ArticleRequest) -> Result<Articles, NewsError> {
        match self {
            ActiveProvider::Search(a) => a.fetch_articles(request).await,
            ActiveProvider::Generative(a) => a.fetch_articles(request).await,
        }
    }
}

/// Choose and construct the backend for this run.
///
/// # Errors
///
/// - [`NewsError::MissingCredential`] naming the first secret the chosen
///   backend needs that `lookup` cannot supply
/// - [`NewsError::Config`] if the configured base URL is unusable
/// - [`NewsError::Provider`] if the HTTP client cannot be built
#[instrument(level = "info", skip(lookup, config))]
pub fn select_provider<F>(
    token: Option<&str>,
    lookup: &F,
    config: &AppConfig,
) -> Result<ActiveProvider, NewsError>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = ProviderKind::from_selector(token);
    let provider = match kind {
        ProviderKind::Search => {
            let credentials = SearchCredentials::load(lookup)?;
            let client = NewsApiClient::new(credentials, &config.search.base_url)?;
            debug!(endpoint = %client.endpoint(), "NewsAPI client ready");
            ActiveProvider::Search(SearchAdapter::new(client))
        }
        ProviderKind::Generative => {
            let credentials = GenerativeCredentials::load(lookup)?;
            let client = OpenAiClient::new(credentials, &config.generative.base_url)?;
            debug!(endpoint = %client.endpoint(), "OpenAI client ready");
            ActiveProvider::Generative(GenerativeAdapter::new(client, config.generative.clone()))
        }
    };
    info!(%kind, "Provider selected");
    Ok(provider)
}


#[cfg(test)]
mod tests {
    use super::testing::{MockCompletion, MockSearch};
    use super::*;
    use crate::config::GenerativeSettings;
    use crate::credentials::{NEWSAPI_API_KEY, OPENAI_API_KEY, OPENAI_ORGANIZATION};
    use crate::models::SearchResponse;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn missing_name(res: Result<ActiveProvider, NewsError>) -> String {
        match res {
            Err(NewsError::MissingCredential(name)) => name,
            Err(other) => panic!("expected MissingCredential, got {other:?}"),
            Ok(p) => panic!("expected MissingCredential, got provider {}", p.kind()),
        }
    }

    fn request(category: &str) -> ArticleRequest {
        ArticleRequest {
            params: QueryParameters::new(["mode", "fashion"]).unwrap(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_selector_tokens() {
        assert_eq!(ProviderKind::from_selector(Some("n")), ProviderKind::Search);
        assert_eq!(ProviderKind::from_selector(Some("c")), ProviderKind::Generative);
        assert_eq!(ProviderKind::from_selector(Some("N")), ProviderKind::Generative);
        assert_eq!(ProviderKind::from_selector(Some("")), ProviderKind::Generative);
        assert_eq!(ProviderKind::from_selector(None), ProviderKind::Generative);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ProviderKind::Search.to_string(), "search");
        assert_eq!(ProviderKind::Generative.to_string(), "generative");
    }

    #[test]
    fn test_select_search() {
        let env = env_of(&[(NEWSAPI_API_KEY, "news-key")]);
        let provider = select_provider(Some("n"), &env, &AppConfig::default()).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Search);
    }

    #[test]
    fn test_select_search_without_key() {
        let env = env_of(&[(OPENAI_ORGANIZATION, "org"), (OPENAI_API_KEY, "k")]);
        let res = select_provider(Some("n"), &env, &AppConfig::default());
        assert_eq!(missing_name(res), NEWSAPI_API_KEY);

        let empty = env_of(&[(NEWSAPI_API_KEY, "")]);
        let res = select_provider(Some("n"), &empty, &AppConfig::default());
        assert_eq!(missing_name(res), NEWSAPI_API_KEY);
    }

    #[test]
    fn test_select_generative_fallback() {
        let env = env_of(&[(OPENAI_ORGANIZATION, "org"), (OPENAI_API_KEY, "k")]);
        for token in [None, Some("c"), Some("anything")] {
            let provider = select_provider(token, &env, &AppConfig::default()).unwrap();
            assert_eq!(provider.kind(), ProviderKind::Generative);
        }
    }

    #[test]
    fn test_select_generative_needs_both_secrets() {
        let only_org = env_of(&[(OPENAI_ORGANIZATION, "org"), (NEWSAPI_API_KEY, "x")]);
        let res = select_provider(None, &only_org, &AppConfig::default());
        assert_eq!(missing_name(res), OPENAI_API_KEY);

        let only_key = env_of(&[(OPENAI_API_KEY, "k")]);
        let res = select_provider(Some("c"), &only_key, &AppConfig::default());
        assert_eq!(missing_name(res), OPENAI_ORGANIZATION);
    }

    #[test]
    fn test_select_rejects_bad_base_url() {
        let env = env_of(&[(NEWSAPI_API_KEY, "news-key")]);
        let mut config = AppConfig::default();
        config.search.base_url = "not a url".to_string();
        let res = select_provider(Some("n"), &env, &config);
        assert!(matches!(res, Err(NewsError::Config(_))));
    }

    #[tokio::test]
    async fn test_search_variant_dispatches_to_search_backend() {
        let provider: ActiveProvider<MockSearch, MockCompletion> =
            ActiveProvider::Search(SearchAdapter::new(MockSearch::returning(
                SearchResponse::default(),
            )));

        let articles = provider.fetch_articles(&request("trend")).await.unwrap();
        assert!(matches!(articles, Articles::Search(_)));
        match &provider {
            ActiveProvider::Search(a) => assert_eq!(a.backend().calls(), 1),
            ActiveProvider::Generative(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_generative_variant_dispatches_to_completion_backend() {
        let provider: ActiveProvider<MockSearch, MockCompletion> =
            ActiveProvider::Generative(GenerativeAdapter::new(
                MockCompletion::returning("headline"),
                GenerativeSettings::default(),
            ));

        let articles = provider.fetch_articles(&request("trend")).await.unwrap();
        assert!(matches!(articles, Articles::Generated(_)));
        match &provider {
            ActiveProvider::Generative(a) => assert_eq!(a.backend().calls(), 1),
            ActiveProvider::Search(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_search_variant_ignores_category() {
        let provider: ActiveProvider<MockSearch, MockCompletion> =
            ActiveProvider::Search(SearchAdapter::new(MockSearch::default()));
        assert!(provider.fetch_articles(&request("nonsense")).await.is_ok());
    }
}
