//! REST backend configuration types

use crate::{get_env_or_default, get_required_env, ConfigError, ConfigResult};
use std::env;

/// Default user agent sent with every backend request
pub const DEFAULT_USER_AGENT: &str = "Bookshelf/1.0";

/// Page-oriented REST backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the REST backend (e.g., http://localhost:5000)
    pub base_url: String,

    /// Optional request timeout in seconds.
    ///
    /// `None` leaves the HTTP transport's defaults in place.
    pub timeout_secs: Option<u64>,

    /// User agent sent with backend requests
    pub user_agent: String,
}

impl BackendConfig {
    /// Load backend configuration from environment variables
    ///
    /// Requires `REST_API_BASE_URL`. `REST_API_TIMEOUT_SECS` and
    /// `REST_API_USER_AGENT` are optional.
    pub fn from_env() -> ConfigResult<Self> {
        let base_url = get_required_env("REST_API_BASE_URL")?;
        Self::validate_base_url(&base_url)?;

        let timeout_secs = match env::var("REST_API_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse().map_err(|e| {
                ConfigError::InvalidValue("REST_API_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?),
            _ => None,
        };

        Ok(Self {
            base_url,
            timeout_secs,
            user_agent: get_env_or_default("REST_API_USER_AGENT", DEFAULT_USER_AGENT),
        })
    }

    /// Create a configuration pointing at the given base URL (useful for testing)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Build the full URL for a resource path, e.g. `authors/3` or `reviews?bookId=1`
    pub fn resource_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn validate_base_url(raw: &str) -> ConfigResult<()> {
        let parsed = url::Url::parse(raw.trim())
            .map_err(|e| ConfigError::InvalidUrl("REST_API_BASE_URL".to_string(), e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidUrl(
                "REST_API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = BackendConfig::new("http://localhost:5000");
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_resource_url() {
        let config = BackendConfig::new("http://localhost:5000");
        assert_eq!(config.resource_url("authors"), "http://localhost:5000/authors");
        assert_eq!(
            config.resource_url("/reviews?bookId=1"),
            "http://localhost:5000/reviews?bookId=1"
        );
    }

    #[test]
    fn test_resource_url_with_trailing_slash() {
        let config = BackendConfig::new("http://localhost:5000/");
        assert_eq!(config.resource_url("books/7"), "http://localhost:5000/books/7");
    }

    #[test]
    fn test_from_env_requires_base_url() {
        temp_env::with_var_unset("REST_API_BASE_URL", || {
            let result = BackendConfig::from_env();
            assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
        });
    }

    #[test]
    fn test_from_env_rejects_non_http_scheme() {
        temp_env::with_var("REST_API_BASE_URL", Some("ftp://backend"), || {
            let result = BackendConfig::from_env();
            assert!(matches!(result, Err(ConfigError::InvalidUrl(_, _))));
        });
    }

    #[test]
    fn test_from_env_reads_optional_values() {
        temp_env::with_vars(
            [
                ("REST_API_BASE_URL", Some("http://json-server:3000")),
                ("REST_API_TIMEOUT_SECS", Some("15")),
                ("REST_API_USER_AGENT", Some("bookshelf-test")),
            ],
            || {
                let config = BackendConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://json-server:3000");
                assert_eq!(config.timeout_secs, Some(15));
                assert_eq!(config.user_agent, "bookshelf-test");
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_timeout() {
        temp_env::with_vars(
            [
                ("REST_API_BASE_URL", Some("http://json-server:3000")),
                ("REST_API_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                let result = BackendConfig::from_env();
                assert!(matches!(result, Err(ConfigError::InvalidValue(_, _))));
            },
        );
    }
}
