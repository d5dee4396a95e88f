//! Partitioned response storage for the offline shell worker.
//!
//! This crate provides:
//! - `CacheStore` - Backend trait over named, persistent cache partitions
//! - `MemoryStore` - In-memory implementation
//! - `DiskStore` - JSON-snapshot-per-partition implementation for the CLI
//! - `CacheStatus` - Lookup outcome for logging and debug headers

mod disk;
mod error;
mod memory;
mod snapshot;
mod status;
mod store;

pub use disk::*;
pub use error::*;
pub use memory::*;
pub use snapshot::*;
pub use status::*;
pub use store::*;
