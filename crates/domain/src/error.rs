//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building requests or checking responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The URL scheme has no connection type.
    #[error("Scheme '{0}' is not supported.")]
    UnsupportedScheme(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Links and redirects can only be followed with GET or POST.
    #[error("Only \"get\" or \"post\" are allowed for method (you gave {0:?})")]
    InvalidRedirectMethod(String),

    /// A `Set-Cookie` header could not be parsed.
    #[error("Could not parse cookie header {header:?}: {reason}")]
    CookieParse {
        /// The raw header value.
        header: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The response status did not match what the caller expected.
    #[error("Bad response: {status} (not {expected} for {url})\n{body}")]
    UnexpectedStatus {
        /// Status line, e.g. "404 Not Found".
        status: String,
        /// Description of the accepted statuses.
        expected: String,
        /// URL of the request.
        url: String,
        /// Response body, lossily decoded.
        body: String,
    },

    /// The response carried a non-empty error stream.
    #[error("Application had errors logged:\n{0}")]
    ErrorsLogged(String),

    /// `follow` was called on a response that is not a redirect.
    #[error("You can only follow redirect responses (not {0})")]
    NotRedirect(String),

    /// A redirect response had no `Location` header.
    #[error("redirect response has no Location header")]
    MissingLocation,

    /// Redirects kept coming past the allowed number of hops.
    #[error("redirects chain looks infinite (more than {max} redirects)")]
    TooManyRedirects {
        /// Maximum number of hops that were followed.
        max: usize,
    },

    /// The body is missing an expected string.
    #[error("Body does not contain string {0:?}")]
    MissingContent(String),

    /// The body contains a string it must not contain.
    #[error("Body contains bad string {0:?}")]
    UnexpectedContent(String),

    /// A regular expression could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// The request or response body is invalid for its content type.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
