//! Live connection port

use std::future::Future;

use livetest_domain::{Headers, HttpMethod, Scheme};
use thiserror::Error;

/// A request as it goes over a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request target: path plus query.
    pub target: String,
    /// Headers to send, without `Host`.
    pub headers: Headers,
    /// Body bytes.
    pub body: Vec<u8>,
}

/// A response as read from a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// Numeric status code.
    pub status: u16,
    /// Reason phrase.
    pub reason: String,
    /// Header list in wire order.
    pub headers: Headers,
    /// Body bytes.
    pub body: Vec<u8>,
}

/// Errors a connection can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// The request target could not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that was hit.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host being resolved.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Host that refused.
        host: String,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    Body(String),

    /// The client could not be built or another error occurred.
    #[error("{0}")]
    Other(String),
}

/// A long-lived connection to one host over one scheme.
///
/// Requests are sent serially; a connection is never shared between
/// test apps.
pub trait Connection: Send + Sync {
    /// Sends a request and reads the whole response.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure. HTTP error statuses are not
    /// errors at this level.
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<WireResponse, ConnectionError>> + Send;
}

/// Opens connections for a test app.
pub trait Connector: Send + Sync {
    /// Connection type produced by this connector.
    type Connection: Connection;

    /// Opens a connection to `host` over `scheme`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    fn connect(&self, scheme: Scheme, host: &str) -> Result<Self::Connection, ConnectionError>;
}
