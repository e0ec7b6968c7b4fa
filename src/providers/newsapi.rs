//! NewsAPI search adapter.
//!
//! Converts [`QueryParameters`] into a request against the NewsAPI
//! ["everything"](https://newsapi.org/docs/endpoints/everything) endpoint:
//!
//! | Parameter | Derived from |
//! |-----------|--------------|
//! | `q` | keywords joined with single spaces |
//! | `sources` | sources joined with commas (`""` when empty) |
//! | `domains` | domains joined with commas (`""` when empty) |
//! | `from` | today minus the day-count window, `YYYY-MM-DD` |
//! | `language` | passed through |
//! | `sortBy` | passed through |
//!
//! The response is returned verbatim; nothing is re-sorted or filtered.

use super::{ArticleRequest, ArticleSource, ProviderKind};
use crate::credentials::SearchCredentials;
use crate::error::NewsError;
use crate::models::{Articles, QueryParameters, SearchResponse};
use crate::utils::{
    endpoint_url, join_filter, join_keywords, today, truncate_for_log, window_start,
};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use url::Url;

const BACKEND: &str = "newsapi";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The six fields sent to the "everything" endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverythingQuery {
    pub q: String,
    pub sources: String,
    pub domains: String,
    pub from_param: NaiveDate,
    pub language: String,
    pub sort_by: String,
}

impl EverythingQuery {
    /// Query-string pairs using NewsAPI's parameter names.
    pub fn to_pairs(&self) -> [(&'static str, String); 6] {
        [
            ("q", self.q.clone()),
            ("sources", self.sources.clone()),
            ("domains", self.domains.clone()),
            ("from", self.from_param.format("%Y-%m-%d").to_string()),
            ("language", self.language.clone()),
            ("sortBy", self.sort_by.clone()),
        ]
    }
}

/// Build the "everything" query for `params` with the window anchored at `today`.
pub fn build_everything_query(
    params: &QueryParameters,
    today: NaiveDate,
) -> Result<EverythingQuery, NewsError> {
    let from_param = window_start(today, params.days_before)
        .ok_or(NewsError::InvalidWindow(params.days_before))?;
    Ok(EverythingQuery {
        q: join_keywords(params.keywords()),
        sources: join_filter(&params.sources),
        domains: join_filter(&params.domains),
        from_param,
        language: params.language.clone(),
        sort_by: params.sort_by.clone(),
    })
}

/// Backend capable of running an "everything" search.
pub trait SearchBackend {
    async fn everything(&self, query: &EverythingQuery) -> Result<SearchResponse, NewsError>;
}

/// HTTP client for NewsAPI.
pub struct NewsApiClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: SearchCredentials,
}

impl NewsApiClient {
    /// Build a client for `base_url` (e.g. `https://newsapi.org`).
    ///
    /// A path on `base_url` is kept as a prefix of `/v2/everything`.
    pub fn new(credentials: SearchCredentials, base_url: &str) -> Result<Self, NewsError> {
        let endpoint = endpoint_url(base_url, &["v2", "everything"])
            .map_err(|e| NewsError::Config(format!("invalid search base_url {base_url:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NewsError::provider(BACKEND, e))?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The authenticated GET for `query`, not yet sent.
    fn request(&self, query: &EverythingQuery) -> reqwest::RequestBuilder {
        self.http
            .get(self.endpoint.clone())
            .header("X-Api-Key", &self.credentials.api_key)
            .query(&query.to_pairs())
    }
}

/// Error body NewsAPI sends with `"status": "error"`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("{status}: {code}: {message}"),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => format!("{status}: {message}"),
        _ => format!("{status}: {}", truncate_for_log(body, 200)),
    }
}

/// Turn a response into articles. A non-2xx status or a body with
/// `"status": "error"` is a backend failure.
fn decode(status: StatusCode, body: &str) -> Result<SearchResponse, NewsError> {
    if !status.is_success() {
        return Err(NewsError::provider(BACKEND, describe_error(status, body)));
    }
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| NewsError::provider(BACKEND, e))?;
    if parsed.status == "error" {
        return Err(NewsError::provider(BACKEND, describe_error(status, body)));
    }
    Ok(parsed)
}

impl SearchBackend for NewsApiClient {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint))]
    async fn everything(&self, query: &EverythingQuery) -> Result<SearchResponse, NewsError> {
        let resp = self
            .request(query)
            .send()
            .await
            .map_err(|e| NewsError::provider(BACKEND, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| NewsError::provider(BACKEND, e))?;
        debug!(%status, preview = %truncate_for_log(&body, 300), "NewsAPI response");

        decode(status, &body)
    }
}

/// Fetch articles from the search backend.
///
/// The window is anchored at today's local date.
///
/// # Errors
///
/// - [`NewsError::InvalidWindow`] if the window start is not a valid date
/// - [`NewsError::Provider`] if the backend call fails; it is not retried
#[instrument(level = "info", skip_all, fields(backend = BACKEND))]
pub async fn fetch_search_articles<B: SearchBackend>(
    backend: &B,
    params: &QueryParameters,
) -> Result<SearchResponse, NewsError> {
    let query = build_everything_query(params, today())?;
    info!(
        q = %query.q,
        from = %query.from_param,
        sources = %query.sources,
        domains = %query.domains,
        language = %query.language,
        sort_by = %query.sort_by,
        "Searching articles"
    );

    match backend.everything(&query).await {
        Ok(response) => {
            info!(
                total_results = response.total_results,
                count = response.articles.len(),
                "Fetched articles"
            );
            Ok(response)
        }
        Err(e) => {
            error!(error = %e, "Search request failed");
            Err(e)
        }
    }
}

/// [`ArticleSource`] for the search variant.
pub struct SearchAdapter<B> {
    backend: B,
}

impl<B> SearchAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SearchBackend> ArticleSource for SearchAdapter<B> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Search
    }

    async fn fetch_articles(&self, request: &ArticleRequest) -> Result<Articles, NewsError> {
        fetch_search_articles(&self.backend, &request.params)
            .await
            .map(Articles::Search)
    }
}
