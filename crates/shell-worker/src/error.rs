//! Error types for the cache controller.

use thiserror::Error;

use shell_cache::CacheError;
use shell_core::CoreError;

/// Errors surfaced by controller lifecycle operations.
///
/// Request-time network failures are not errors at this level; they resolve
/// through the fallback paths of `on_fetch`.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// A manifest URL could not be precached. Installation is
    /// all-or-nothing per partition, so one bad URL fails the install.
    #[error("precache of {url} failed: {reason}")]
    Install {
        /// The manifest URL that failed.
        url: String,
        /// What went wrong.
        reason: String,
    },

    /// Cache storage failure.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Core type failure (lifecycle misuse, bad manifest path).
    #[error(transparent)]
    Core(#[from] CoreError),
}
