//! Stored responses and request identities.

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

/// Identity of a stored request: its absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestKey(String);

impl RequestKey {
    /// Create a key from an absolute URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RequestKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RequestKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A fully buffered HTTP response as kept in a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

impl CachedResponse {
    /// Create a response with the given status and body.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a `200 OK` response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Add a header. Invalid names or values are skipped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Check for a 2xx status.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ok() {
        let resp = CachedResponse::ok("hello");
        assert!(resp.is_ok());
        assert_eq!(resp.text(), "hello");
    }

    #[test]
    fn test_response_status_range() {
        assert!(CachedResponse::new(StatusCode::NO_CONTENT, "").is_ok());
        assert!(!CachedResponse::new(StatusCode::NOT_FOUND, "").is_ok());
        assert!(!CachedResponse::new(StatusCode::SERVICE_UNAVAILABLE, "").is_ok());
    }

    #[test]
    fn test_response_headers() {
        let resp = CachedResponse::ok("{}")
            .with_header("content-type", "application/json")
            .with_header("bad header", "x");

        assert_eq!(resp.headers.len(), 1);
        assert_eq!(resp.headers["content-type"], "application/json");
    }

    #[test]
    fn test_request_key() {
        let key = RequestKey::from("https://app.example.com/");
        assert_eq!(key.as_str(), "https://app.example.com/");
        assert_eq!(key.to_string(), "https://app.example.com/");
    }
}
