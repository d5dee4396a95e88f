//! The page-to-worker control contract.

use serde::{Deserialize, Serialize};

/// Control messages a controlled page may post to the worker.
///
/// The wire shape is `{ "type": "SKIP_WAITING" }`. Anything else
/// deserializes to `Unknown` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Collapse a waiting controller into the active state.
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,

    /// Any unrecognized message type.
    #[serde(other)]
    Unknown,
}

impl ControlMessage {
    /// Parse a message from its JSON wire form.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
