//! The worker runtime seam.

use async_trait::async_trait;

/// Hooks into whatever runtime hosts the controller.
///
/// The adapter registering the controller's event handlers implements this;
/// tests inject a recording fake.
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Ask the runtime to activate this controller without waiting for
    /// pages controlled by a prior version to close.
    async fn skip_waiting(&self);

    /// Take control of all currently open pages immediately, rather than
    /// on their next navigation.
    async fn claim_clients(&self);
}
