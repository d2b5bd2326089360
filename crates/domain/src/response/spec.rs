//! Test response type
//!
//! Holds what came back over the wire together with the request that
//! produced it, so links and redirects can be resolved against the page.

use indexmap::IndexMap;
use regex::Regex;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::navigation::resolve_target;
use crate::request::{Headers, TestRequest};
use crate::testing::StatusExpectation;

/// HTTP response as seen by test code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    /// Numeric status code.
    pub status_code: u16,
    /// Reason phrase sent by the server (e.g., "OK").
    pub reason: String,
    /// Response headers in wire order.
    pub headers: Headers,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Error stream of the application; always empty for live requests.
    pub errors: String,
    /// The request that produced this response.
    pub request: TestRequest,
    /// Cookies the server set during this exchange.
    pub cookies_set: IndexMap<String, String>,
}

impl TestResponse {
    /// Creates a response for `request` from wire data.
    #[must_use]
    pub fn new(
        request: TestRequest,
        status_code: u16,
        reason: impl Into<String>,
        headers: Headers,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status_code,
            reason: reason.into(),
            headers,
            body,
            errors: String::new(),
            request,
            cookies_set: IndexMap::new(),
        }
    }

    /// Returns the status line, e.g. "200 OK".
    #[must_use]
    pub fn status(&self) -> String {
        if self.reason.is_empty() {
            self.status_code.to_string()
        } else {
            format!("{} {}", self.status_code, self.reason)
        }
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status_int(&self) -> u16 {
        self.status_code
    }

    /// Returns true for 3xx responses.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        self.status_code >= 300 && self.status_code < 400
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns every value of a header.
    #[must_use]
    pub fn headers_all(&self, name: &str) -> Vec<&str> {
        self.headers.get_all(name)
    }

    /// Returns the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the `Location` header.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> DomainResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// Checks the status against `expected` and that no errors were logged.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnexpectedStatus`] or
    /// [`DomainError::ErrorsLogged`].
    pub fn check(&self, expected: &StatusExpectation) -> DomainResult<()> {
        if !expected.matches(self.status_code) {
            return Err(DomainError::UnexpectedStatus {
                status: self.status(),
                expected: expected.description(),
                url: self.request.url.to_string(),
                body: self.text(),
            });
        }
        if !self.errors.is_empty() {
            return Err(DomainError::ErrorsLogged(self.errors.clone()));
        }
        Ok(())
    }

    /// Asserts that the body contains every string in `needles`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingContent`] for the first absent string.
    pub fn mustcontain(&self, needles: &[&str]) -> DomainResult<()> {
        let text = self.text();
        match needles.iter().find(|needle| !text.contains(**needle)) {
            Some(missing) => Err(DomainError::MissingContent((*missing).to_string())),
            None => Ok(()),
        }
    }

    /// Asserts that the body contains none of the strings in `needles`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnexpectedContent`] for the first present string.
    pub fn mustcontain_none(&self, needles: &[&str]) -> DomainResult<()> {
        let text = self.text();
        match needles.iter().find(|needle| text.contains(**needle)) {
            Some(found) => Err(DomainError::UnexpectedContent((*found).to_string())),
            None => Ok(()),
        }
    }

    /// Asserts that the body matches a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPattern`] if the pattern does not
    /// compile and [`DomainError::MissingContent`] if nothing matches.
    pub fn must_match(&self, pattern: &str) -> DomainResult<()> {
        let regex = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern(e.to_string()))?;
        if regex.is_match(&self.text()) {
            Ok(())
        } else {
            Err(DomainError::MissingContent(format!("/{pattern}/")))
        }
    }

    /// Resolves a link target against this page's URL, dropping any fragment.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if `href` cannot be joined.
    pub fn goto_target(&self, href: &str) -> DomainResult<Url> {
        resolve_target(&self.request.url, href)
    }

    /// Resolves the `Location` of a redirect response.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotRedirect`] for non-3xx responses and
    /// [`DomainError::MissingLocation`] when there is no `Location` header.
    pub fn follow_target(&self) -> DomainResult<Url> {
        if !self.is_redirect() {
            return Err(DomainError::NotRedirect(self.status()));
        }
        let location = self.location().ok_or(DomainError::MissingLocation)?;
        self.goto_target(location)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, reason: &str, headers: &[(&str, &str)], body: &str) -> TestResponse {
        let request = TestRequest::get("http://pypi.example.org/pypi/search?term=x").unwrap();
        let headers = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TestResponse::new(request, status, reason, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_status_line() {
        assert_eq!(response(200, "OK", &[], "").status(), "200 OK");
        assert_eq!(response(299, "", &[], "").status(), "299");
        assert_eq!(response(404, "Not Found", &[], "").status_int(), 404);
    }

    #[test]
    fn test_new_has_empty_errors() {
        let resp = response(200, "OK", &[], "");
        assert!(resp.errors.is_empty());
        assert!(resp.cookies_set.is_empty());
    }

    #[test]
    fn test_check_default_expectation() {
        assert!(response(302, "Found", &[], "").check(&StatusExpectation::Default).is_ok());

        let err = response(404, "Not Found", &[], "nothing here")
            .check(&StatusExpectation::Default)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad response: 404 Not Found (not 200 OK or 3xx redirect for \
             http://pypi.example.org/pypi/search?term=x)\nnothing here"
        );
    }

    #[test]
    fn test_check_logged_errors() {
        let mut resp = response(200, "OK", &[], "");
        resp.errors = "boom".to_string();
        assert_eq!(
            resp.check(&StatusExpectation::Any),
            Err(DomainError::ErrorsLogged("boom".to_string()))
        );
    }

    #[test]
    fn test_mustcontain() {
        let resp = response(200, "OK", &[], "<h1>Index of Packages</h1>");
        assert!(resp.mustcontain(&["Index", "Packages"]).is_ok());
        assert_eq!(
            resp.mustcontain(&["Index", "livetest"]),
            Err(DomainError::MissingContent("livetest".to_string()))
        );
        assert_eq!(
            resp.mustcontain_none(&["error", "Index"]),
            Err(DomainError::UnexpectedContent("Index".to_string()))
        );
    }

    #[test]
    fn test_must_match() {
        let resp = response(200, "OK", &[], "version 0.1.0");
        assert!(resp.must_match(r"\d+\.\d+\.\d+").is_ok());
        assert!(matches!(resp.must_match("("), Err(DomainError::InvalidPattern(_))));
        assert!(matches!(resp.must_match("^nope$"), Err(DomainError::MissingContent(_))));
    }

    #[test]
    fn test_json_body() {
        let resp = response(200, "OK", &[("Content-Type", "application/json")], r#"{"id":7}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(resp.content_type(), Some("application/json"));
        assert!(response(200, "OK", &[], "<html>").json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_follow_target() {
        let resp = response(302, "Found", &[("Location", "../simple/#latest")], "");
        assert_eq!(
            resp.follow_target().unwrap().as_str(),
            "http://pypi.example.org/simple/"
        );
    }

    #[test]
    fn test_follow_target_requires_redirect() {
        let resp = response(200, "OK", &[("Location", "/x")], "");
        assert_eq!(
            resp.follow_target(),
            Err(DomainError::NotRedirect("200 OK".to_string()))
        );

        let resp = response(301, "Moved Permanently", &[], "");
        assert_eq!(resp.follow_target(), Err(DomainError::MissingLocation));
    }

    #[test]
    fn test_goto_target_relative_to_page() {
        let resp = response(200, "OK", &[], "");
        assert_eq!(
            resp.goto_target("detail?name=webtest").unwrap().as_str(),
            "http://pypi.example.org/pypi/detail?name=webtest"
        );
    }
}
