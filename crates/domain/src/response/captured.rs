//! Captured response type
//!
//! Holds everything received from one HTTP exchange: status code, headers,
//! the fully buffered body and the wall-clock time it took.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::{Header, Headers};

/// HTTP response captured by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedResponse {
    status: u16,
    headers: Headers,
    #[serde(with = "crate::encoding::base64_bytes")]
    body: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    json: Option<serde_json::Value>,
    #[serde(with = "crate::encoding::duration_millis")]
    elapsed: Duration,
}

impl CapturedResponse {
    /// Creates a captured response from raw response data.
    ///
    /// Repeated header names are kept, see [`Headers::append`]. The body is parsed as JSON when possible; the raw bytes are always kept.
    #[must_use]
    pub fn new(
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        let headers = headers
            .into_iter()
            .fold(Headers::new(), |mut headers, (name, value)| {
                headers.append(Header::new(name, value));
                headers
            });
        let json = if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        };

        Self {
            status,
            headers,
            body,
            json,
            elapsed,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Looks up a header value, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Content-Type header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parsed JSON body, or `None` when the body is empty or not JSON.
    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }

    /// Looks up a value inside the JSON body by JSON pointer (e.g. `/data/id`).
    #[must_use]
    pub fn json_pointer(&self, pointer: &str) -> Option<&serde_json::Value> {
        self.json.as_ref().and_then(|json| json.pointer(pointer))
    }

    /// Time from dispatch to full receipt of the body.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// [`elapsed`](Self::elapsed) in whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
