//! Cookie session types.
//!
//! The jar is a flat name to value store: whatever the server sets is
//! replayed on the next request, without domain or path filtering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::Headers;

/// A cookie as read from a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value, with surrounding double quotes removed.
    pub value: String,
}

impl SetCookie {
    /// Parse a single `Set-Cookie` header value.
    ///
    /// Attributes (`Path`, `Expires`, ...) are accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CookieParse`] when the header has no
    /// `name=value` pair or the name is not a valid token.
    pub fn parse(header: &str) -> DomainResult<Self> {
        let parse_error = |reason: String| DomainError::CookieParse {
            header: header.to_string(),
            reason,
        };

        let parsed = ::cookie::Cookie::parse(header).map_err(|e| parse_error(e.to_string()))?;
        let name = parsed.name();
        if let Some(bad) = name.chars().find(|c| !is_token_char(*c)) {
            return Err(parse_error(format!("illegal character {bad:?} in cookie name")));
        }

        Ok(Self {
            name: name.to_string(),
            value: unquote(parsed.value()).to_string(),
        })
    }
}

/// Cookie jar holding the session state of a test app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    cookies: IndexMap<String, String>,
}

impl CookieJar {
    /// Create a new empty cookie jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie, replacing any previous value under the same name.
    ///
    /// A replaced cookie keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Get a cookie value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Remove a cookie by name, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.cookies.shift_remove(name)
    }

    /// Clear all cookies.
    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    /// Get the number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if the jar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterate over cookies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the `Cookie` header value, or `None` for an empty jar.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(pairs.join("; "))
    }

    /// Store every cookie from the `Set-Cookie` headers in `headers`.
    ///
    /// Returns the cookies set by this batch of headers, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError::CookieParse`] hit. Cookies from
    /// headers before the malformed one are already stored.
    pub fn process_set_cookies(
        &mut self,
        headers: &Headers,
    ) -> DomainResult<IndexMap<String, String>> {
        let mut set = IndexMap::new();
        for header in headers.get_all("set-cookie") {
            let cookie = SetCookie::parse(header)?;
            self.insert(cookie.name.clone(), cookie.value.clone());
            set.insert(cookie.name, cookie.value);
        }
        Ok(set)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieJar {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            cookies: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// RFC 7230 `tchar`.
const fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_set_cookie() {
        let cookie = SetCookie::parse("session=abc123; Path=/; HttpOnly; Secure").unwrap();
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
    }

    #[test]
    fn test_parse_quoted_value() {
        let cookie = SetCookie::parse(r#"theme="dark mode"; Path=/"#).unwrap();
        assert_eq!(cookie.value, "dark mode");
    }

    #[test]
    fn test_parse_empty_value() {
        let cookie = SetCookie::parse("session=; Max-Age=0").unwrap();
        assert_eq!(cookie.value, "");
    }

    #[test]
    fn test_parse_missing_pair() {
        let err = SetCookie::parse("garbage").unwrap_err();
        match err {
            DomainError::CookieParse { header, .. } => assert_eq!(header, "garbage"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_name() {
        assert!(matches!(
            SetCookie::parse("=value"),
            Err(DomainError::CookieParse { .. })
        ));
    }

    #[test]
    fn test_parse_illegal_name() {
        let err = SetCookie::parse("bad[name]=1").unwrap_err();
        assert!(err.to_string().starts_with("Could not parse cookie header \"bad[name]=1\""));
        assert!(err.to_string().contains("illegal character '['"));
    }

    #[test]
    fn test_cookie_header_keeps_insertion_order() {
        let mut jar = CookieJar::new();
        jar.insert("b", "2");
        jar.insert("a", "1");
        jar.insert("b", "3");

        assert_eq!(jar.cookie_header().unwrap(), "b=3; a=1");
    }

    #[test]
    fn test_empty_jar_has_no_header() {
        assert_eq!(CookieJar::new().cookie_header(), None);
    }

    #[test]
    fn test_process_set_cookies() {
        let mut headers = Headers::new();
        headers.append("Content-Type", "text/html");
        headers.append("Set-Cookie", "session=abc; Path=/");
        headers.append("set-cookie", "csrf=xyz");

        let mut jar: CookieJar = [("existing", "1")].into_iter().collect();
        let set = jar.process_set_cookies(&headers).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("session").map(String::as_str), Some("abc"));
        assert_eq!(jar.get("csrf"), Some("xyz"));
        assert_eq!(jar.cookie_header().unwrap(), "existing=1; session=abc; csrf=xyz");
    }

    #[test]
    fn test_process_set_cookies_malformed() {
        let mut headers = Headers::new();
        headers.append("Set-Cookie", "ok=1");
        headers.append("Set-Cookie", "broken");

        let mut jar = CookieJar::new();
        assert!(jar.process_set_cookies(&headers).is_err());
        assert_eq!(jar.get("ok"), Some("1"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut jar: CookieJar = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(jar.remove("b"), Some("2".to_string()));
        assert_eq!(jar.cookie_header().unwrap(), "a=1; c=3");

        jar.clear();
        assert!(jar.is_empty());
    }

    #[test]
    fn test_jar_serde_roundtrip_shape() {
        let jar: CookieJar = [("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&jar).unwrap();
        assert_eq!(json, r#"{"a":"1"}"#);
    }
}
