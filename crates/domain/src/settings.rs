//! Test app settings.
//!
//! Describes the live site a test app talks to and how its client behaves.

use serde::{Deserialize, Serialize};

use crate::cookie::CookieJar;
use crate::error::{DomainError, DomainResult};
use crate::request::Header;
use crate::scheme::Scheme;

/// Settings for a test app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveTestSettings {
    /// Host (and optional port) every connection targets.
    pub host: String,
    /// Scheme of the default connection.
    #[serde(default)]
    pub scheme: Scheme,
    /// Base URL relative request paths resolve against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_to: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User-Agent header sent by the client.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Skip TLS certificate verification (self-signed staging sites).
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Headers added to every request.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Cookies the session starts with.
    #[serde(default)]
    pub cookies: CookieJar,
}

/// Default request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default User-Agent header.
#[must_use]
pub fn default_user_agent() -> String {
    format!("livetest/{}", env!("CARGO_PKG_VERSION"))
}

impl LiveTestSettings {
    /// Creates settings for `host` with defaults for everything else.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            scheme: Scheme::default(),
            relative_to: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
            headers: Vec::new(),
            cookies: CookieJar::new(),
        }
    }

    /// Set the default scheme.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_relative_to(mut self, relative_to: impl Into<String>) -> Self {
        self.relative_to = Some(relative_to.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Checks that the settings can produce a working test app.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] for an empty host or a host that
    /// carries a scheme or path.
    pub fn validate(&self) -> DomainResult<()> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(DomainError::InvalidUrl("host is required".to_string()));
        }
        if host.contains("://") || host.contains('/') {
            return Err(DomainError::InvalidUrl(format!(
                "host must not contain a scheme or path: {host}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_from_minimal_json() {
        let settings: LiveTestSettings = serde_json::from_str(r#"{"host": "pypi.org"}"#).unwrap();
        assert_eq!(settings, LiveTestSettings::new("pypi.org"));
        assert_eq!(settings.scheme, Scheme::Http);
        assert_eq!(settings.timeout_ms, 30_000);
        assert!(settings.user_agent.starts_with("livetest/"));
    }

    #[test]
    fn test_full_json() {
        let settings: LiveTestSettings = serde_json::from_str(
            r#"{
                "host": "staging.example.com:8443",
                "scheme": "https",
                "relative_to": "/app/",
                "accept_invalid_certs": true,
                "headers": [{"name": "X-Env", "value": "staging"}],
                "cookies": {"session": "abc"}
            }"#,
        )
        .unwrap();

        assert_eq!(settings.scheme, Scheme::Https);
        assert_eq!(settings.relative_to.as_deref(), Some("/app/"));
        assert_eq!(settings.headers, vec![Header::new("X-Env", "staging")]);
        assert_eq!(settings.cookies.get("session"), Some("abc"));
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let result: Result<LiveTestSettings, _> =
            serde_json::from_str(r#"{"host": "example.com", "scheme": "ftp"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(LiveTestSettings::new("example.com:8080").validate().is_ok());
        assert!(LiveTestSettings::new("  ").validate().is_err());
        assert!(LiveTestSettings::new("http://example.com").validate().is_err());
    }
}
