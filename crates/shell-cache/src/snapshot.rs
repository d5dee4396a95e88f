//! Serializable response snapshots.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use shell_core::{FetchResponse, ResponseKind};

/// A stored response in serializable form.
///
/// `http` types do not implement serde, so the disk store keeps headers as
/// string pairs and the status as its numeric code. Converting back drops
/// any header that no longer parses, which cannot happen for headers that
/// came out of a real `HeaderMap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Response type.
    pub kind: ResponseKind,
}

impl From<&FetchResponse> for ResponseSnapshot {
    fn from(response: &FetchResponse) -> Self {
        let headers = response
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Self {
            status: response.status.as_u16(),
            headers,
            body: response.body.to_vec(),
            kind: response.kind,
        }
    }
}

impl ResponseSnapshot {
    /// Rebuild the captured response.
    pub fn into_response(self) -> FetchResponse {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.append(name, value);
            }
        }

        FetchResponse {
            status: StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK),
            headers,
            body: Bytes::from(self.body),
            kind: self.kind,
        }
    }
}
