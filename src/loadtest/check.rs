use reqwest::header::{HeaderMap, LOCATION};
use reqwest::StatusCode;

/// Redirect target the scenario expects for `/example`.
pub const EXPECTED_TARGET: &str = "https://www.example.com";

/// Why a response did not count as the expected redirect.
///
/// The `Display` text is what goose records as the failure reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedirectError {
    #[error("Expected a redirect but got {status}")]
    UnexpectedStatus { status: u16 },
    #[error("Expected redirect to {expected} but got {actual}")]
    WrongTarget { expected: String, actual: String },
    #[error("Expected redirect to {expected} but the response had no usable Location header")]
    MissingLocation { expected: String },
}

/// A `302 Found` pointing at one exact target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectExpectation {
    target: String,
}

impl Default for RedirectExpectation {
    fn default() -> Self {
        Self::new(EXPECTED_TARGET)
    }
}

impl RedirectExpectation {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Check a response's status and headers.
    ///
    /// The `Location` value is compared after trimming surrounding whitespace.
    pub fn check(&self, status: StatusCode, headers: &HeaderMap) -> Result<(), RedirectError> {
        if status != StatusCode::FOUND {
            return Err(RedirectError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let location = headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| RedirectError::MissingLocation {
                expected: self.target.clone(),
            })?;

        let actual = location.trim();
        if actual == self.target {
            Ok(())
        } else {
            Err(RedirectError::WrongTarget {
                expected: self.target.clone(),
                actual: actual.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn location(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_matching_redirect() {
        let expectation = RedirectExpectation::default();
        assert_eq!(
            expectation.check(StatusCode::FOUND, &location("https://www.example.com")),
            Ok(())
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let expectation = RedirectExpectation::default();
        assert_eq!(
            expectation.check(StatusCode::FOUND, &location("  https://www.example.com  ")),
            Ok(())
        );
    }

    #[test]
    fn test_wrong_target_reports_both_urls() {
        let err = RedirectExpectation::default()
            .check(StatusCode::FOUND, &location("https://google.com"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("https://www.example.com"));
        assert!(message.contains("https://google.com"));
        assert_eq!(
            err,
            RedirectError::WrongTarget {
                expected: "https://www.example.com".to_string(),
                actual: "https://google.com".to_string(),
            }
        );
    }

    #[test]
    fn test_comparison_is_exact() {
        let expectation = RedirectExpectation::default();
        assert!(expectation
            .check(StatusCode::FOUND, &location("https://www.example.com/"))
            .is_err());
        assert!(expectation
            .check(StatusCode::FOUND, &location("HTTPS://WWW.EXAMPLE.COM"))
            .is_err());
    }

    #[test]
    fn test_non_redirect_status_reports_code() {
        let expectation = RedirectExpectation::default();
        for code in [200u16, 404, 301, 500] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = expectation.check(status, &HeaderMap::new()).unwrap_err();
            assert_eq!(err, RedirectError::UnexpectedStatus { status: code });
            assert!(err.to_string().contains(&code.to_string()));
        }
    }

    #[test]
    fn test_other_redirect_codes_fail_even_with_right_location() {
        let err = RedirectExpectation::default()
            .check(
                StatusCode::MOVED_PERMANENTLY,
                &location("https://www.example.com"),
            )
            .unwrap_err();
        assert_eq!(err, RedirectError::UnexpectedStatus { status: 301 });
    }

    #[test]
    fn test_missing_location() {
        let err = RedirectExpectation::default()
            .check(StatusCode::FOUND, &HeaderMap::new())
            .unwrap_err();
        assert!(matches!(err, RedirectError::MissingLocation { .. }));
        assert!(err.to_string().contains("https://www.example.com"));
    }
}
