//! Status expectations for test responses.

use serde::{Deserialize, Serialize};

/// Which response statuses a request accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusExpectation {
    /// Any 2xx or 3xx status.
    #[default]
    Default,
    /// Any status at all.
    Any,
    /// Exact status code.
    Exact(u16),
    /// One of multiple status codes.
    OneOf(Vec<u16>),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Default => (200..400).contains(&status),
            Self::Any => true,
            Self::Exact(expected) => status == *expected,
            Self::OneOf(codes) => codes.contains(&status),
            Self::Range { min, max } => status >= *min && status <= *max,
        }
    }

    /// Get description of the accepted statuses.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Default => "200 OK or 3xx redirect".to_string(),
            Self::Any => "any status".to_string(),
            Self::Exact(code) => code.to_string(),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("one of {}", codes_str.join(", "))
            }
            Self::Range { min, max } => format!("in {min}-{max}"),
        }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl From<u16> for StatusExpectation {
    fn from(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl From<Vec<u16>> for StatusExpectation {
    fn from(codes: Vec<u16>) -> Self {
        Self::OneOf(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_accepts_success_and_redirects() {
        let expected = StatusExpectation::default();
        assert!(expected.matches(200));
        assert!(expected.matches(204));
        assert!(expected.matches(302));
        assert!(!expected.matches(404));
        assert!(!expected.matches(500));
        assert!(!expected.matches(101));
    }

    #[test]
    fn test_any() {
        assert!(StatusExpectation::Any.matches(500));
    }

    #[test]
    fn test_exact_and_one_of() {
        assert!(StatusExpectation::exact(404).matches(404));
        assert!(!StatusExpectation::exact(404).matches(200));

        let expected: StatusExpectation = vec![200, 201].into();
        assert!(expected.matches(201));
        assert!(!expected.matches(202));
    }

    #[test]
    fn test_range() {
        let expected = StatusExpectation::Range { min: 400, max: 499 };
        assert!(expected.matches(400));
        assert!(expected.matches(499));
        assert!(!expected.matches(500));
    }

    #[test]
    fn test_description() {
        assert_eq!(
            StatusExpectation::Default.description(),
            "200 OK or 3xx redirect"
        );
        assert_eq!(StatusExpectation::OneOf(vec![200, 201]).description(), "one of 200, 201");
    }
}
