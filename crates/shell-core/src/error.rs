//! Error types for shell-core.

use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Errors that can occur in the core types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Lifecycle transition not permitted from the current state.
    #[error("invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        /// State the controller was in.
        from: LifecycleState,
        /// State that was requested.
        to: LifecycleState,
    },

    /// A URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
