//! Link and redirect target rewriting.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// Methods a link or redirect can be followed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMethod {
    /// Follow with a GET request.
    #[default]
    Get,
    /// Follow with a POST request.
    Post,
}

impl NavigationMethod {
    /// Returns the HTTP method to dispatch.
    #[must_use]
    pub const fn http_method(self) -> HttpMethod {
        match self {
            Self::Get => HttpMethod::Get,
            Self::Post => HttpMethod::Post,
        }
    }
}

impl fmt::Display for NavigationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.http_method())
    }
}

impl FromStr for NavigationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            other => Err(DomainError::InvalidRedirectMethod(other.to_string())),
        }
    }
}

/// Resolve `href` against the page at `current`, dropping any fragment.
///
/// Relative targets keep the scheme and host of `current`; an href that
/// names its own scheme or host keeps those.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] if `href` cannot be joined.
pub fn resolve_target(current: &Url, href: &str) -> DomainResult<Url> {
    let mut target = current
        .join(href)
        .map_err(|e| DomainError::InvalidUrl(format!("{e}: {href}")))?;
    target.set_fragment(None);
    Ok(target)
}
