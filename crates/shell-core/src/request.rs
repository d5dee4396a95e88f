//! Intercepted request model.

use http::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

/// What kind of resource a request is for.
///
/// Mirrors the request destination the host runtime reports. Only
/// `Document` changes controller behavior (navigation fallback); the rest
/// exist for logging and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// A full-page navigation.
    Document,
    /// A script subresource.
    Script,
    /// A stylesheet subresource.
    Style,
    /// An image subresource.
    Image,
    /// A font subresource.
    Font,
    /// The web app manifest.
    Manifest,
    /// Anything else (fetch/XHR, workers, ...).
    #[default]
    Other,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Script => write!(f, "script"),
            Self::Style => write!(f, "style"),
            Self::Image => write!(f, "image"),
            Self::Font => write!(f, "font"),
            Self::Manifest => write!(f, "manifest"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// An outgoing request intercepted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: Method,
    /// Full request URL.
    pub url: Url,
    /// Resource destination reported by the host.
    pub destination: Destination,
}

impl FetchRequest {
    /// Create a new request.
    pub fn new(method: Method, url: Url, destination: Destination) -> Self {
        Self {
            method,
            url,
            destination,
        }
    }

    /// Create a GET request for an already-parsed URL.
    pub fn get_url(url: Url) -> Self {
        Self::new(Method::GET, url, Destination::Other)
    }

    /// Create a GET request for a subresource.
    pub fn get(url: impl AsRef<str>) -> Result<Self, CoreError> {
        Ok(Self::new(
            Method::GET,
            Url::parse(url.as_ref())?,
            Destination::Other,
        ))
    }

    /// Create a GET navigation request.
    pub fn navigation(url: impl AsRef<str>) -> Result<Self, CoreError> {
        Ok(Self::new(
            Method::GET,
            Url::parse(url.as_ref())?,
            Destination::Document,
        ))
    }

    /// Set the destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Whether this is a GET request.
    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// Whether the URL scheme is `http` or `https`.
    ///
    /// Requests with any other scheme (extension pages, data URLs) are left
    /// to default host handling.
    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// Whether this is a full-page navigation.
    pub fn is_navigation(&self) -> bool {
        self.destination == Destination::Document
    }

    /// Request path.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Request host, if any.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Cache key identifying this request.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.method, &self.url)
    }
}

/// A cache key uniquely identifying a stored response.
///
/// The full request identity: method plus URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a key from method and URL.
    pub fn new(method: &Method, url: &Url) -> Self {
        Self(format!("{} {}", method, url))
    }

    /// Create a key from a raw string (e.g. read back from disk).
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
