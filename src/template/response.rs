//! The normalized response value type.

use std::borrow::Cow;
use std::fmt;

use crate::template::headers::Headers;

/// A completed HTTP response: status code, raw body bytes, and headers.
///
/// A `Response` is constructed exactly once per completed request attempt,
/// after the body has been fully drained into memory, and is immutable from
/// then on. Equality compares all three fields structurally.
///
/// # Example
///
/// ```rust
/// use http_template::{Headers, Response};
///
/// let mut headers = Headers::new();
/// headers.append("foo", "bar");
///
/// let response = Response::new(200, "any old body", headers);
/// assert_eq!(response.code(), 200);
/// assert_eq!(response.body(), b"any old body");
/// assert_eq!(response.body_string(), "any old body");
/// assert_eq!(response.headers().get("foo"), Some("bar"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    code: u16,
    body: Vec<u8>,
    headers: Headers,
}

impl Response {
    /// Creates a response from a status code, body bytes, and headers.
    #[must_use]
    pub fn new(code: u16, body: impl Into<Vec<u8>>, headers: Headers) -> Self {
        Self {
            code,
            body: body.into(),
            headers,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as a string, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response(code: {}, body: {}, headers: [{}])",
            self.code,
            self.body_string(),
            self.headers
        )
    }
}
