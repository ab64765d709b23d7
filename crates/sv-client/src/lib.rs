//! # sv-client
//!
//! Async HTTP client for the question/user API:
//! - users: list, get, create, update, delete, default-user bootstrap
//! - questions: search, fetch by id (optionally reranked), recent searches
//!
//! Every response body is a `{"data": ...}` envelope; the client unwraps it
//! and hands back `sv-core` types.

mod error;
mod http;
pub mod questions;
pub mod users;

pub use error::ClientError;

use std::time::Duration;

use sv_config::ApiConfig;

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to a single API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL is not an
    /// absolute http(s) URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = config.normalized_base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (`path` starts with `/`).
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
