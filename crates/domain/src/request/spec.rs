//! Test request type

use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// A request as the test code describes it, before it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL of the page being requested
    pub url: Url,
    /// HTTP headers
    pub headers: Headers,
    /// Request body bytes
    pub body: Vec<u8>,
}

impl TestRequest {
    /// Creates a request with no headers and an empty body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Creates a GET request for an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn get(url: &str) -> DomainResult<Self> {
        let url = Url::parse(url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))?;
        Ok(Self::new(HttpMethod::Get, url))
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Sets the body, and its content type unless one was already given.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        if let Some(content_type) = body.content_type()
            && !self.headers.contains("content-type")
        {
            self.headers.set("Content-Type", content_type);
        }
        self.body = body.content;
        self
    }

    /// Appends query parameters to the URL.
    #[must_use]
    pub fn with_query<K, V>(mut self, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if !params.is_empty() {
            self.url
                .query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
        }
        self
    }

    /// Returns the URL scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Returns the path followed by `?query` when the URL has a query.
    #[must_use]
    pub fn path_qs(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_qs() {
        let req = TestRequest::get("http://example.com/pypi?term=rust#top").unwrap();
        assert_eq!(req.path_qs(), "/pypi?term=rust");

        let req = TestRequest::get("http://example.com").unwrap();
        assert_eq!(req.path_qs(), "/");
    }

    #[test]
    fn test_with_query_appends() {
        let req = TestRequest::get("http://example.com/search?a=1")
            .unwrap()
            .with_query(&[("q", "live test")]);
        assert_eq!(req.path_qs(), "/search?a=1&q=live+test");
    }

    #[test]
    fn test_with_body_sets_content_type() {
        let body = RequestBody::form(&[("a", "1")]).unwrap();
        let req = TestRequest::get("http://example.com/").unwrap().with_body(body);
        assert_eq!(
            req.headers.get("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(req.body, b"a=1".to_vec());
    }

    #[test]
    fn test_with_body_keeps_caller_content_type() {
        let req = TestRequest::get("http://example.com/")
            .unwrap()
            .with_header("content-type", "text/csv")
            .with_body(RequestBody::text("a,b"));
        assert_eq!(req.headers.get_all("Content-Type"), vec!["text/csv"]);
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            TestRequest::get("not a url"),
            Err(DomainError::InvalidUrl(_))
        ));
    }
}
