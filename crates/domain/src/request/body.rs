//! HTTP Request body types

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// HTTP request body: the bytes sent on the wire and their content type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestBody {
    /// The encoded body.
    pub content: Vec<u8>,
    /// The content type, if the body has one.
    pub content_type: Option<String>,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            content: Vec::new(),
            content_type: None,
        }
    }

    /// Creates a body from raw bytes with an explicit content type.
    #[must_use]
    pub fn raw(content: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: Some(content_type.into()),
        }
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::raw(content.into(), mime::TEXT_PLAIN_UTF_8.as_ref())
    }

    /// Creates an `application/x-www-form-urlencoded` body from form fields.
    ///
    /// Fields keep their order, and a name may repeat.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields cannot be encoded.
    pub fn form<K, V>(fields: &[(K, V)]) -> DomainResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect();
        let encoded = serde_urlencoded::to_string(pairs)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self::raw(
            encoded,
            mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
        ))
    }

    /// Creates an `application/json` body from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        let content =
            serde_json::to_vec(value).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self::raw(content, mime::APPLICATION_JSON.as_ref()))
    }

    /// Returns whether the body is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_body() {
        let body = RequestBody::form(&[("term", "python testing"), ("submit", "Search")]).unwrap();
        assert_eq!(body.content, b"term=python+testing&submit=Search".to_vec());
        assert_eq!(
            body.content_type(),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_form_body_repeated_names() {
        let body = RequestBody::form(&[("tag", "a"), ("tag", "b")]).unwrap();
        assert_eq!(body.content, b"tag=a&tag=b".to_vec());
    }

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(&serde_json::json!({"key": "value"})).unwrap();
        assert_eq!(body.content_type(), Some("application/json"));
        assert_eq!(body.content, br#"{"key":"value"}"#.to_vec());
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::none();
        assert!(body.is_empty());
        assert_eq!(body.content_type(), None);
    }
}
