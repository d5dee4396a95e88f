//! Core abstractions for the offline shell worker.
//!
//! This crate provides the fundamental types:
//! - `FetchRequest` / `FetchResponse` - Intercepted request/response model
//! - `CacheKey` - Full request identity used as the partition key
//! - `LifecycleState` - Controller lifecycle tracking
//! - `WorkerConfig` / `PartitionNames` - Injected controller configuration

mod config;
mod error;
mod lifecycle;
mod request;
mod response;

pub use config::*;
pub use error::*;
pub use lifecycle::*;
pub use request::*;
pub use response::*;
