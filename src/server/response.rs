use http::StatusCode;
use may_minihttp::Response;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const HEALTH_BODY: &str = "Health is good!";
pub const NOT_FOUND_BODY: &str = "Not Found";

pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

pub fn write_text(res: &mut Response, status: u16, body: &'static str) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: text/plain; charset=utf-8");
    res.body(body);
}

/// `302 Found` with a pre-rendered `Location:` header line.
pub fn write_redirect(res: &mut Response, location_header: &'static str) {
    res.status_code(302, status_reason(302));
    res.header(location_header);
    res.body("");
}

/// Interned `Location: <target>` header lines.
///
/// `may_minihttp` only accepts `'static` header strings. Each distinct target is
/// rendered and leaked once for the life of the process, so memory grows with the
/// number of distinct targets ever served, not with request volume.
#[derive(Clone, Default)]
pub struct LocationHeaders {
    lines: Arc<RwLock<HashMap<String, &'static str>>>,
}

impl LocationHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header line for `target`, or `None` when the target would break the
    /// response framing (CR, LF or other control characters).
    pub fn line_for(&self, target: &str) -> Option<&'static str> {
        if target.is_empty() || target.chars().any(char::is_control) {
            return None;
        }
        if let Some(line) = self
            .lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
        {
            return Some(*line);
        }
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        let line = *lines
            .entry(target.to_owned())
            .or_insert_with(|| Box::leak(format!("Location: {target}").into_boxed_str()));
        Some(line)
    }

    /// Number of distinct targets rendered so far.
    pub fn len(&self) -> usize {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(302), "Found");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(799), "Unknown");
    }

    #[test]
    fn test_location_lines_are_interned() {
        let headers = LocationHeaders::new();
        let first = headers.line_for("https://www.example.com").unwrap();
        let second = headers.line_for("https://www.example.com").unwrap();
        assert_eq!(first, "Location: https://www.example.com");
        assert!(std::ptr::eq(first, second));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_location_rejects_control_characters() {
        let headers = LocationHeaders::new();
        assert!(headers
            .line_for("https://evil.example\r\nSet-Cookie: a=b")
            .is_none());
        assert!(headers.line_for("").is_none());
        assert!(headers.is_empty());
    }
}
