//! Request routing strategies.

use shell_core::{FetchRequest, WorkerConfig};

/// How a request's response is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Consult the cache first, fetch on miss.
    ///
    /// Applies to fingerprinted static assets and allowlisted CDN hosts;
    /// their content never changes under the same URL, so age checks are
    /// unnecessary.
    CacheFirst,

    /// Fetch first, fall back to the cache on total failure.
    NetworkFirst,
}

impl Strategy {
    /// Classify a request against the configured asset extensions and CDN
    /// allowlist.
    pub fn classify(request: &FetchRequest, config: &WorkerConfig) -> Self {
        let cdn = request.host().is_some_and(|host| config.is_cdn_host(host));
        if cdn || config.is_asset_path(request.path()) {
            Self::CacheFirst
        } else {
            Self::NetworkFirst
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CacheFirst => write!(f, "cache-first"),
            Self::NetworkFirst => write!(f, "network-first"),
        }
    }
}
