//! OpenAI completions adapter.
//!
//! Uses a text-completion model as a stand-in article source. The category
//! picks one of three fixed prompts, the keyword list is interpolated into it,
//! and a single candidate is requested with fixed sampling parameters:
//!
//! - `temperature`: 0.5
//! - `n`: 1
//! - `stop`: none
//! - `frequency_penalty` / `presence_penalty`: 0
//!
//! Categories are validated before any request is built.

use super::{ArticleRequest, ArticleSource, ProviderKind};
use crate::config::GenerativeSettings;
use crate::credentials::GenerativeCredentials;
use crate::error::NewsError;
use crate::models::{Articles, Category, CompletionResponse};
use crate::utils::{endpoint_url, truncate_for_log};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const BACKEND: &str = "openai";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const TEMPERATURE: f32 = 0.5;
pub const CANDIDATES: u32 = 1;

/// Prompt template for `category`; `{keywords}` is replaced by the keyword list.
pub fn prompt_template(category: Category) -> &'static str {
    match category {
        Category::People => {
            "Write short news articles about notable people connected to the following keywords: {keywords}. \
             Start each article with its headline on its own line, followed by a one-paragraph story."
        }
        Category::Trend => {
            "Write short news articles about the latest trends related to the following keywords: {keywords}. \
             Start each article with its headline on its own line, followed by a one-paragraph story."
        }
        Category::History => {
            "Write short news articles about historical events related to the following keywords: {keywords}. \
             Start each article with its headline on its own line, followed by a one-paragraph story."
        }
    }
}

/// Render the prompt for `category` over `keywords`.
///
/// The keyword list is written in its debug form, e.g. `["mode", "fashion"]`.
pub fn build_prompt(category: Category, keywords: &[String]) -> String {
    prompt_template(category).replace("{keywords}", &format!("{keywords:?}"))
}

/// Body of a `/v1/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub n: u32,
    /// Always serialized, as `null`.
    pub stop: Option<Vec<String>>,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl CompletionRequest {
    fn new(model: &str, prompt: String, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            max_tokens,
            temperature: TEMPERATURE,
            n: CANDIDATES,
            stop: None,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Backend capable of running one completion.
pub trait CompletionBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, NewsError>;
}

/// HTTP client for the OpenAI completions endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: GenerativeCredentials,
}

impl OpenAiClient {
    /// Build a client for `base_url` (e.g. `https://api.openai.com`).
    pub fn new(credentials: GenerativeCredentials, base_url: &str) -> Result<Self, NewsError> {
        let endpoint = endpoint_url(base_url, &["v1", "completions"])
            .map_err(|e| {
                NewsError::Config(format!("invalid generative base_url {base_url:?}: {e}"))
            })?;
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

    fn request(&self, request: &CompletionRequest) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint.clone())
            .bearer_auth(&self.credentials.api_key)
            .header("OpenAI-Organization", &self.credentials.organization)
            .json(request)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorDetail {
                message,
                kind: Some(kind),
            },
        }) => format!("{status}: {kind}: {message}"),
        Ok(ErrorEnvelope { error }) => format!("{status}: {}", error.message),
        Err(_) => format!("{status}: {}", truncate_for_log(body, 200)),
    }
}

fn decode(status: StatusCode, body: &str) -> Result<CompletionResponse, NewsError> {
    if !status.is_success() {
        return Err(NewsError::provider(BACKEND, describe_error(status, body)));
    }
    serde_json::from_str(body).map_err(|e| NewsError::provider(BACKEND, e))
}

impl CompletionBackend for OpenAiClient {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint, model = %request.model))]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, NewsError> {
        let resp = self
            .request(request)
            .send()
            .await
            .map_err(|e| NewsError::provider(BACKEND, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| NewsError::provider(BACKEND, e))?;
        debug!(%status, preview = %truncate_for_log(&body, 300), "OpenAI response");

        decode(status, &body)
    }
}

/// Generate "articles" for `keywords` with the completion backend.
///
/// `max_results` is accepted for interface parity but not enforced: exactly
/// one candidate is requested.
///
/// # Errors
///
/// - [`NewsError::InvalidCategory`] if `category` is not `people`, `trend`
///   or `history`; the backend is not called
/// - [`NewsError::Provider`] if the backend call fails; it is not retried
#[instrument(level = "info", skip_all, fields(backend = BACKEND, %category))]
pub async fn generate_articles<B: CompletionBackend>(
    backend: &B,
    keywords: &[String],
    category: &str,
    model_engine: &str,
    max_tokens: u32,
    max_results: u32,
) -> Result<CompletionResponse, NewsError> {
    let category: Category = category.parse()?;
    let request = CompletionRequest::new(model_engine, build_prompt(category, keywords), max_tokens);
    info!(
        model = %request.model,
        max_tokens,
        max_results,
        ?keywords,
        "Requesting completion"
    );

    match backend.complete(&request).await {
        Ok(response) => {
            if response.choices.is_empty() {
                warn!("Completion returned no choices");
            } else {
                info!(
                    id = ?response.id,
                    model = ?response.model,
                    choices = response.choices.len(),
                    finish_reason = ?response.choices[0].finish_reason,
                    "Generated articles"
                );
            }
            Ok(response)
        }
        Err(e) => {
            error!(error = %e, "Completion request failed");
            Err(e)
        }
    }
}

/// [`ArticleSource`] for the generative variant.
pub struct GenerativeAdapter<B> {
    backend: B,
    settings: GenerativeSettings,
}

impl<B> GenerativeAdapter<B> {
    pub fn new(backend: B, settings: GenerativeSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: CompletionBackend> ArticleSource for GenerativeAdapter<B> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Generative
    }

    async fn fetch_articles(&self, request: &ArticleRequest) -> Result<Articles, NewsError> {
        generate_articles(
            &self.backend,
            request.params.keywords(),
            &request.category,
            &self.settings.model_engine,
            self.settings.max_tokens,
            self.settings.max_results,
        )
        .await
        .map(Articles::Generated)
    }
}
