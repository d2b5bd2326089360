//! Test app use case
//!
//! Drives a live site through a WebTest-style API: requests go over real
//! connections, one per scheme, and a cookie jar carries the session from
//! one request to the next.

mod bridge;
mod navigation;
mod options;


use std::collections::HashMap;
use std::collections::hash_map::Entry;

use livetest_domain::{
    CookieJar, DomainError, DomainResult, Headers, HttpMethod, LiveTestSettings, RequestBody,
    Scheme, TestResponse,
};
use serde::Serialize;
use tracing::info;
use url::Url;

use crate::ApplicationResult;
use crate::ports::Connector;

pub use navigation::MAX_REDIRECTS;
pub use options::RequestOptions;

/// A test app bound to one live host.
///
/// # Example
///
/// ```ignore
/// let mut app = TestApp::new(ReqwestConnector::default(), "pypi.org", "https", None, None)?;
/// let resp = app.get("/search/?q=webtest").await?;
/// resp.mustcontain(&["webtest"])?;
/// ```
pub struct TestApp<C: Connector> {
    connector: C,
    host: String,
    scheme: Scheme,
    base: Url,
    conn: HashMap<Scheme, C::Connection>,
    cookies: CookieJar,
    extra_headers: Headers,
}

impl<C: Connector> TestApp<C> {
    /// Creates a test app for `host`.
    ///
    /// The connection for `scheme` is opened right away. Relative request
    /// URLs resolve against `relative_to` when given (an absolute URL, or a
    /// path under `scheme://host/`), else against `scheme://host/`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedScheme`] for schemes other than
    /// `http`/`https`, and an error if the base URL is invalid or the
    /// connection cannot be opened.
    pub fn new(
        connector: C,
        host: impl Into<String>,
        scheme: &str,
        relative_to: Option<&str>,
        cookiejar: Option<CookieJar>,
    ) -> ApplicationResult<Self> {
        let host = host.into();
        let scheme: Scheme = scheme.parse()?;
        let base = base_url(scheme, &host, relative_to)?;

        let mut app = Self {
            connector,
            host,
            scheme,
            base,
            conn: HashMap::new(),
            cookies: cookiejar.unwrap_or_default(),
            extra_headers: Headers::new(),
        };
        app.connection(scheme.as_str())?;
        Ok(app)
    }

    /// Creates a test app from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the default
    /// connection cannot be opened.
    pub fn from_settings(connector: C, settings: &LiveTestSettings) -> ApplicationResult<Self> {
        settings.validate()?;
        let mut app = Self::new(
            connector,
            settings.host.trim(),
            settings.scheme.as_str(),
            settings.relative_to.as_deref(),
            Some(settings.cookies.clone()),
        )?;
        for header in &settings.headers {
            app.set_extra_header(header.name.clone(), header.value.clone());
        }
        Ok(app)
    }

    /// Returns the connection for `scheme`, opening it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedScheme`] for unknown schemes, or
    /// the connector's error if opening fails.
    pub fn connection(&mut self, scheme: &str) -> ApplicationResult<&C::Connection> {
        let scheme: Scheme = scheme.parse()?;
        match self.conn.entry(scheme) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let connection = self.connector.connect(scheme, &self.host)?;
                info!(%scheme, host = %self.host, "opened connection");
                Ok(entry.insert(connection))
            }
        }
    }

    /// Returns the host every connection targets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the default scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the URL relative request paths resolve against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Returns the session cookies.
    #[must_use]
    pub const fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Returns the session cookies for editing.
    pub const fn cookies_mut(&mut self) -> &mut CookieJar {
        &mut self.cookies
    }

    /// Sets a session cookie by hand.
    pub fn set_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name, value);
    }

    /// Forgets the session: clears every cookie.
    pub fn reset(&mut self) {
        self.cookies.clear();
    }

    /// Adds a header sent with every request. Per-request headers override it.
    pub fn set_extra_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extra_headers.set(name, value);
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn extra_headers(&self) -> &Headers {
        &self.extra_headers
    }

    /// Resolves a request URL against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the URL cannot be joined.
    pub fn resolve_url(&self, url: &str) -> DomainResult<Url> {
        self.base
            .join(url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))
    }

    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// Fails on connection errors, malformed cookies, or a status outside
    /// 2xx/3xx.
    pub async fn get(&mut self, url: &str) -> ApplicationResult<TestResponse> {
        self.get_with(url, RequestOptions::default()).await
    }

    /// Issues a GET request with options.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`]; the status check follows `options`.
    pub async fn get_with(
        &mut self,
        url: &str,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Get, url, RequestBody::none(), options)
            .await
    }

    /// Issues a POST request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn post(&mut self, url: &str, body: RequestBody) -> ApplicationResult<TestResponse> {
        self.post_with(url, body, RequestOptions::default()).await
    }

    /// Issues a POST request with options.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get_with`].
    pub async fn post_with(
        &mut self,
        url: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Post, url, body, options).await
    }

    /// Submits form fields as a url-encoded POST.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn post_form<K, V>(
        &mut self,
        url: &str,
        fields: &[(K, V)],
    ) -> ApplicationResult<TestResponse>
    where
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let body = RequestBody::form(fields)?;
        self.post(url, body).await
    }

    /// POSTs a value serialized as JSON.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn post_json<T: Serialize + Sync + ?Sized>(
        &mut self,
        url: &str,
        value: &T,
    ) -> ApplicationResult<TestResponse> {
        let body = RequestBody::json(value)?;
        self.post(url, body).await
    }

    /// Issues a PUT request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get_with`].
    pub async fn put_with(
        &mut self,
        url: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Put, url, body, options).await
    }

    /// Issues a PUT request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn put(&mut self, url: &str, body: RequestBody) -> ApplicationResult<TestResponse> {
        self.put_with(url, body, RequestOptions::default()).await
    }

    /// Issues a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get_with`].
    pub async fn patch_with(
        &mut self,
        url: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Patch, url, body, options)
            .await
    }

    /// Issues a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn patch(&mut self, url: &str, body: RequestBody) -> ApplicationResult<TestResponse> {
        self.patch_with(url, body, RequestOptions::default()).await
    }

    /// Issues a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get_with`].
    pub async fn delete_with(
        &mut self,
        url: &str,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Delete, url, RequestBody::none(), options)
            .await
    }

    /// Issues a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn delete(&mut self, url: &str) -> ApplicationResult<TestResponse> {
        self.delete_with(url, RequestOptions::default()).await
    }

    /// Issues a HEAD request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get_with`].
    pub async fn head_with(
        &mut self,
        url: &str,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Head, url, RequestBody::none(), options)
            .await
    }

    /// Issues a HEAD request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn head(&mut self, url: &str) -> ApplicationResult<TestResponse> {
        self.head_with(url, RequestOptions::default()).await
    }

    /// Issues an OPTIONS request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get_with`].
    pub async fn options_with(
        &mut self,
        url: &str,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(HttpMethod::Options, url, RequestBody::none(), options)
            .await
    }

    /// Issues an OPTIONS request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::get`].
    pub async fn options(&mut self, url: &str) -> ApplicationResult<TestResponse> {
        self.options_with(url, RequestOptions::default()).await
    }
}

/// Builds the URL relative request paths resolve against.
fn base_url(scheme: Scheme, host: &str, relative_to: Option<&str>) -> DomainResult<Url> {
    let root = Url::parse(&format!("{scheme}://{host}/"))
        .map_err(|e| DomainError::InvalidUrl(format!("{e}: {scheme}://{host}/")))?;

    let Some(relative_to) = relative_to else {
        return Ok(root);
    };

    match Url::parse(relative_to) {
        Ok(absolute) => {
            absolute.scheme().parse::<Scheme>()?;
            Ok(absolute)
        }
        Err(_) => root
            .join(relative_to)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {relative_to}"))),
    }
}
