//! Error taxonomy for provider selection and article fetching.
//!
//! Every variant is terminal: nothing in the application retries, degrades to
//! partial results, or falls back from one backend to the other. Errors bubble
//! up to `main`, which logs them and exits non-zero.

use thiserror::Error;

/// Errors raised while selecting a provider or fetching articles.
#[derive(Debug, Error)]
pub enum NewsError {
    /// A required secret was absent or empty.
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    /// The generative path received a category outside `people`, `trend`, `history`.
    #[error("invalid category: {0:?} (expected one of \"people\", \"trend\", \"history\")")]
    InvalidCategory(String),

    /// The active backend failed (transport, HTTP status, error body, undecodable response).
    #[error("{backend} request failed: {message}")]
    Provider {
        backend: &'static str,
        message: String,
    },

    /// A query was built with no keywords.
    #[error("query must contain at least one keyword")]
    EmptyQuery,

    /// The day-count window reaches outside the representable calendar.
    #[error("invalid day-count window: {0} days")]
    InvalidWindow(u32),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NewsError {
    pub fn provider<E: std::fmt::Display>(backend: &'static str, err: E) -> Self {
        Self::Provider {
            backend,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_names_secret() {
        let e = NewsError::MissingCredential("NEWSAPI_API_KEY".to_string());
        assert_eq!(e.to_string(), "missing credential: NEWSAPI_API_KEY is not set");
    }

    #[test]
    fn test_invalid_category_shows_value() {
        let e = NewsError::InvalidCategory("nonsense".to_string());
        assert!(e.to_string().contains("\"nonsense\""));
    }

    #[test]
    fn test_provider_carries_backend_and_cause() {
        let e = NewsError::provider("newsapi", "401 Unauthorized");
        assert_eq!(e.to_string(), "newsapi request failed: 401 Unauthorized");
        match e {
            NewsError::Provider { backend, .. } => assert_eq!(backend, "newsapi"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
