//! Live connections using reqwest.
//!
//! This adapter implements the `Connector` and `Connection` ports with the
//! reqwest library. Each connection owns its own client, so every scheme
//! keeps its own connection pool for the lifetime of a test app.

use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use livetest_application::ports::{
    Connection, ConnectionError, Connector, WireRequest, WireResponse,
};
use livetest_domain::settings::{DEFAULT_TIMEOUT_MS, default_user_agent};
use livetest_domain::{Headers, HttpMethod, LiveTestSettings, Scheme};
use reqwest::{Client, Method, Url};
use tracing::debug;

/// Opens reqwest-backed connections.
///
/// Clients never follow redirects and keep no cookie store: both are
/// handled by the test app.
#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    timeout_ms: u64,
    user_agent: String,
    accept_invalid_certs: bool,
}

impl ReqwestConnector {
    /// Creates a connector with default settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: never
    /// - TLS verification: enabled
    /// - User-Agent: "livetest/<version>"
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }

    /// Creates a connector configured from test app settings.
    #[must_use]
    pub fn from_settings(settings: &LiveTestSettings) -> Self {
        Self {
            timeout_ms: settings.timeout_ms,
            user_agent: settings.user_agent.clone(),
            accept_invalid_certs: settings.accept_invalid_certs,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Skips TLS certificate verification.
    #[must_use]
    pub const fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    fn build_client(&self) -> Result<Client, ConnectionError> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_millis(self.timeout_ms))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| ConnectionError::Other(e.to_string()))
    }
}

impl Default for ReqwestConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for ReqwestConnector {
    type Connection = ReqwestConnection;

    fn connect(&self, scheme: Scheme, host: &str) -> Result<ReqwestConnection, ConnectionError> {
        Ok(ReqwestConnection {
            client: self.build_client()?,
            scheme,
            host: host.to_string(),
            timeout_ms: self.timeout_ms,
        })
    }
}

/// A connection to one host over one scheme.
#[derive(Debug, Clone)]
pub struct ReqwestConnection {
    client: Client,
    scheme: Scheme,
    host: String,
    timeout_ms: u64,
}

impl ReqwestConnection {
    /// Returns the scheme this connection speaks.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the host this connection targets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds the absolute URL for a request target.
    fn url_for(&self, target: &str) -> Result<Url, ConnectionError> {
        let url = format!("{}://{}{}", self.scheme, self.host, target);
        Url::parse(&url).map_err(|e| ConnectionError::InvalidUrl(format!("{e}: {url}")))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to port `ConnectionError`.
    fn map_error(&self, error: &reqwest::Error) -> ConnectionError {
        if error.is_timeout() {
            return ConnectionError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        let message = error_chain(error);
        if error.is_connect() {
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return ConnectionError::DnsError {
                    host: self.host.clone(),
                    message,
                };
            }
            if lower.contains("refused") {
                return ConnectionError::ConnectionRefused {
                    host: self.host.clone(),
                };
            }
            return ConnectionError::ConnectionFailed(message);
        }

        ConnectionError::Other(message)
    }
}

impl Connection for ReqwestConnection {
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<WireResponse, ConnectionError>> + Send {
        async move {
            let url = self.url_for(&request.target)?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url);
            for header in &request.headers {
                builder = builder.header(header.name.as_str(), header.value.as_str());
            }
            if !request.body.is_empty() {
                builder = builder.body(request.body);
            }

            let response = builder.send().await.map_err(|e| {
                let error = self.map_error(&e);
                debug!(scheme = %self.scheme, host = %self.host, %error, "request failed");
                error
            })?;

            let status = response.status();
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
                .or_else(|| status.canonical_reason())
                .unwrap_or_default()
                .to_string();
            let headers: Headers = response
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| ConnectionError::Body(e.to_string()))?
                .to_vec();

            Ok(WireResponse {
                status: status.as_u16(),
                reason,
                headers,
                body,
            })
        }
    }
}

/// Joins an error with its sources, which carry the OS-level cause.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
