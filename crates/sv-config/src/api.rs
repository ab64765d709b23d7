//! Question/user API endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default API base URL (local backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default request timeout in seconds. Reranking calls an LLM server-side and
/// can take a while.
const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("stackview/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check that a base URL is present.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for an empty base URL and
    /// [`ConfigError::InvalidValue`] for a non-HTTP(S) URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: String::from("api"),
            });
        }
        let url = self.normalized_base_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: String::from("api.base_url"),
                reason: format!("'{url}' must start with http:// or https://"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: String::from("api.timeout_secs"),
                reason: String::from("must be greater than zero"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:4000/api");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("stackview/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "https://qa.example.com/api/".into(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "https://qa.example.com/api");
    }

    #[test]
    fn rejects_empty_and_non_http_urls() {
        let empty = ApiConfig {
            base_url: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));

        let ftp = ApiConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(ftp.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.timeout_secs"
        ));
    }
}
