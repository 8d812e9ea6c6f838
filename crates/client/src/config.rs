//! Client configuration.

use anyhow::{bail, Context};
use url::Url;

use crate::log_warn;

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Name of the variable that overrides the backend location.
pub const API_BASE_URL_VAR: &str = "BEASISWA_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and optional port of the backend, without trailing slash.
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build the configuration from the environment.
    ///
    /// Native builds read `BEASISWA_API_BASE_URL` at runtime; the web build has
    /// no process environment, so the value is captured at compile time. An
    /// invalid value is logged and the default is used instead.
    pub fn from_env() -> Self {
        let raw = Self::raw_base_url();
        match raw.as_deref().map(Self::with_base_url) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                log_warn!("ignoring {API_BASE_URL_VAR}: {err:#}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn raw_base_url() -> Option<String> {
        std::env::var(API_BASE_URL_VAR).ok()
    }

    #[cfg(target_arch = "wasm32")]
    fn raw_base_url() -> Option<String> {
        option_env!("BEASISWA_API_BASE_URL").map(str::to_string)
    }

    /// Validate and normalise a base URL.
    pub fn with_base_url(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).with_context(|| format!("invalid base URL {trimmed:?}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("base URL must use http or https, got {}", url.scheme());
        }
        Ok(Self {
            api_base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_trailing_slash() {
        let config = ClientConfig::with_base_url(" https://api.beasiswa.example/ ").unwrap();
        assert_eq!(config.api_base_url, "https://api.beasiswa.example");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ClientConfig::with_base_url("ftp://files.example").is_err());
        assert!(ClientConfig::with_base_url("localhost:5000/api").is_err());
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().api_base_url, DEFAULT_API_BASE_URL);
    }
}
