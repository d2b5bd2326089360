//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Serializes a value to deterministic JSON bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Vec<u8>, SerializationError> {
    Ok(to_json_stable(value)?.into_bytes())
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use livetest_domain::{LiveTestSettings, Scheme};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_json_layout() {
        let settings = LiveTestSettings::new("example.com").with_scheme(Scheme::Https);
        let json = to_json_stable(&settings).unwrap();

        assert!(json.starts_with("{\n  \"host\": \"example.com\",\n  \"scheme\": \"https\""));
        assert!(json.ends_with("}\n"));
        assert!(!json.contains("relative_to"));
    }

    #[test]
    fn test_settings_from_bytes() {
        let settings: LiveTestSettings =
            from_json_bytes(br#"{"host": "example.com", "timeout_ms": 250}"#).unwrap();
        assert_eq!(settings.timeout_ms, 250);
        assert_eq!(settings.scheme, Scheme::Http);
    }

    #[test]
    fn test_from_bytes_rejects_missing_host() {
        let result: Result<LiveTestSettings, _> = from_json_bytes(br#"{"scheme": "https"}"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
