//! Captured response model.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

/// Response type as reported by the host runtime.
///
/// Only `Basic` (same-origin, non-opaque) responses may be inspected and
/// therefore cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin response; fully inspectable.
    #[default]
    Basic,
    /// Cross-origin response allowed by CORS.
    Cors,
    /// Cross-origin no-cors response; body and most headers hidden.
    Opaque,
    /// Opaque redirect response.
    OpaqueRedirect,
    /// A network-level error response.
    Error,
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Cors => write!(f, "cors"),
            Self::Opaque => write!(f, "opaque"),
            Self::OpaqueRedirect => write!(f, "opaqueredirect"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A captured response snapshot: status, headers, and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
    /// Response type.
    pub kind: ResponseKind,
}

impl FetchResponse {
    /// Create a 200 same-origin response with the given body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.into(),
            kind: ResponseKind::Basic,
        }
    }

    /// Create a response with an explicit status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Set the response kind.
    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// The synthetic response returned when a cache-first resource is
    /// unreachable and has no cached copy: HTTP 503, plain text.
    pub fn service_unavailable() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            headers,
            body: Bytes::from_static(b"Service Unavailable"),
            kind: ResponseKind::Error,
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Whether this response may be written to a cache partition.
    ///
    /// Only status 200 same-origin (`Basic`) responses are eligible.
    pub fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK && self.kind == ResponseKind::Basic
    }
}
