//! The partition storage trait.

use async_trait::async_trait;

use shell_core::{CacheKey, FetchResponse};

use crate::error::CacheResult;

/// A backend holding named, persistent key-to-response partitions.
///
/// The platform cache this models serializes individual partition
/// operations; implementations perform no additional locking, so two
/// concurrent writes to the same key are both accepted and the last one
/// wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Open a partition, creating it if absent.
    async fn open(&self, partition: &str) -> CacheResult<()>;

    /// Store a response under the given key, creating the partition if it
    /// does not exist yet.
    async fn put(
        &self,
        partition: &str,
        key: &CacheKey,
        response: FetchResponse,
    ) -> CacheResult<()>;

    /// Look up a key within one partition.
    async fn lookup(&self, partition: &str, key: &CacheKey) -> CacheResult<Option<FetchResponse>>;

    /// Look up a key across all partitions.
    ///
    /// A response written into any partition satisfies the lookup,
    /// regardless of which partition owns that class of resource.
    async fn lookup_any(&self, key: &CacheKey) -> CacheResult<Option<FetchResponse>>;

    /// Delete an entire partition. Returns whether it existed.
    async fn delete_partition(&self, name: &str) -> CacheResult<bool>;

    /// Enumerate existing partition names.
    async fn partition_names(&self) -> CacheResult<Vec<String>>;

    /// Number of entries in a partition (0 if it does not exist).
    async fn entry_count(&self, partition: &str) -> CacheResult<usize>;
}
