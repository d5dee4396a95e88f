//! Cache controller for the offline shell worker.
//!
//! This crate provides:
//! - `CacheController` - Install/activate/fetch/message handling
//! - `Strategy` - Cache-first vs network-first request classification
//! - `Network` / `HostRuntime` - Seams to the fetch API and worker runtime
//! - `ControlMessage` - The page-to-worker control contract
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use shell_cache::MemoryStore;
//! use shell_core::{FetchRequest, WorkerConfig};
//! use shell_worker::CacheController;
//!
//! let controller = CacheController::new(
//!     WorkerConfig::for_version("v1"),
//!     Arc::new(MemoryStore::new()),
//!     network,
//!     host,
//! );
//!
//! controller.on_install().await?;
//! controller.on_activate().await?;
//! let outcome = controller.on_fetch(&FetchRequest::navigation("https://app.example/")?).await;
//! ```

mod controller;
mod error;
mod headers;
mod host;
mod message;
mod network;
mod strategy;

pub use controller::*;
pub use error::*;
pub use headers::*;
pub use host::*;
pub use message::*;
pub use network::*;
pub use strategy::*;
