//! Credential loading from the process environment.
//!
//! Secrets are looked up through a caller-supplied function so that `main`
//! can read the real environment while tests pass a fixed map. Values are
//! held only for the lifetime of the process and are redacted in `Debug`.

use crate::error::NewsError;
use std::fmt;

/// Environment variable holding the NewsAPI key.
pub const NEWSAPI_API_KEY: &str = "NEWSAPI_API_KEY";
/// Environment variable holding the OpenAI organization id.
pub const OPENAI_ORGANIZATION: &str = "OPENAI_ORGANIZATION";
/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Read a secret from the process environment.
///
/// Non-unicode values are treated as absent.
pub fn from_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Return the named secret, or [`NewsError::MissingCredential`] if it is
/// absent, empty, or whitespace-only.
pub fn require<F>(lookup: &F, name: &str) -> Result<String, NewsError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(NewsError::MissingCredential(name.to_string())),
    }
}

/// Secret for the search backend.
#[derive(Clone)]
pub struct SearchCredentials {
    pub api_key: String,
}

impl SearchCredentials {
    pub fn load<F>(lookup: &F) -> Result<Self, NewsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_key: require(lookup, NEWSAPI_API_KEY)?,
        })
    }
}

impl fmt::Debug for SearchCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Secrets for the generative backend. Both must be present.
#[derive(Clone)]
pub struct GenerativeCredentials {
    pub organization: String,
    pub api_key: String,
}

impl GenerativeCredentials {
    pub fn load<F>(lookup: &F) -> Result<Self, NewsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            organization: require(lookup, OPENAI_ORGANIZATION)?,
            api_key: require(lookup, OPENAI_API_KEY)?,
        })
    }
}

impl fmt::Debug for GenerativeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerativeCredentials")
            .field("organization", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
