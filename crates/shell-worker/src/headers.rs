//! Cache debugging headers.

use shell_cache::CacheStatus;
use shell_core::FetchResponse;

/// Header names added to served responses when debug headers are enabled.
pub mod header_names {
    /// How the response was resolved (HIT, MISS, NETWORK, FALLBACK).
    pub const X_CACHE_STATUS: &str = "x-cache-status";
}

/// Annotate a response with its cache status.
pub fn tag_status(response: FetchResponse, status: CacheStatus) -> FetchResponse {
    response.with_header(header_names::X_CACHE_STATUS, &status.to_string())
}
