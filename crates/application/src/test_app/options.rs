//! Per-request options.

use livetest_domain::{Headers, StatusExpectation};

/// Options for a single request issued by a test app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra headers for this request only.
    pub headers: Headers,
    /// Parameters: appended to the query string for GET-like methods,
    /// sent as a url-encoded form otherwise.
    pub params: Vec<(String, String)>,
    /// Statuses accepted without failing the request.
    pub status: StatusExpectation,
    /// Skip status checking entirely.
    pub expect_errors: bool,
}

impl RequestOptions {
    /// Creates options with the default status expectation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Sets the accepted statuses.
    #[must_use]
    pub fn status(mut self, status: impl Into<StatusExpectation>) -> Self {
        self.status = status.into();
        self
    }

    /// Accepts any status without checking.
    #[must_use]
    pub const fn expect_errors(mut self) -> Self {
        self.expect_errors = true;
        self
    }
}
