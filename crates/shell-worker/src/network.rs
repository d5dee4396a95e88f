//! The network seam.

use async_trait::async_trait;
use thiserror::Error;

use shell_core::{FetchRequest, FetchResponse};

/// Total network failures.
///
/// A response with a non-success status is still a successful fetch at this
/// layer; these variants cover the cases where no response arrived at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// No connectivity.
    #[error("network offline")]
    Offline,

    /// Host name did not resolve.
    #[error("dns resolution failed for {0}")]
    Dns(String),

    /// Connection-level failure.
    #[error("connection failed: {0}")]
    Io(String),
}

/// Outbound fetch interface.
///
/// The controller never enforces a deadline; a hung fetch hangs the
/// corresponding request.
#[async_trait]
pub trait Network: Send + Sync {
    /// Perform the network fetch for a request.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError>;
}
