//! Lookup outcome reporting.

use serde::{Deserialize, Serialize};

/// How a request was ultimately answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from a cache partition.
    Hit,
    /// Not found in any partition.
    Miss,
    /// Served live from the network.
    Network,
    /// Served from the offline fallback document.
    Fallback,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Network => write!(f, "NETWORK"),
            Self::Fallback => write!(f, "FALLBACK"),
        }
    }
}
