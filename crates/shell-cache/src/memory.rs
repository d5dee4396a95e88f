//! In-memory partition store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use shell_core::{CacheKey, FetchResponse};

use crate::error::CacheResult;
use crate::store::CacheStore;

type Partition = HashMap<String, FetchResponse>;

/// In-memory `CacheStore` implementation.
///
/// Partitions iterate in name order so cross-partition lookups are
/// deterministic.
#[derive(Default)]
pub struct MemoryStore {
    partitions: RwLock<BTreeMap<String, Partition>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, partition: &str) -> CacheResult<()> {
        let mut partitions = self.partitions.write().await;
        partitions.entry(partition.to_string()).or_default();
        Ok(())
    }

    async fn put(
        &self,
        partition: &str,
        key: &CacheKey,
        response: FetchResponse,
    ) -> CacheResult<()> {
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(partition.to_string())
            .or_default()
            .insert(key.as_str().to_string(), response);
        Ok(())
    }

    async fn lookup(&self, partition: &str, key: &CacheKey) -> CacheResult<Option<FetchResponse>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(partition)
            .and_then(|entries| entries.get(key.as_str()))
            .cloned())
    }

    async fn lookup_any(&self, key: &CacheKey) -> CacheResult<Option<FetchResponse>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .values()
            .find_map(|entries| entries.get(key.as_str()))
            .cloned())
    }

    async fn delete_partition(&self, name: &str) -> CacheResult<bool> {
        let mut partitions = self.partitions.write().await;
        Ok(partitions.remove(name).is_some())
    }

    async fn partition_names(&self) -> CacheResult<Vec<String>> {
        let partitions = self.partitions.read().await;
        Ok(partitions.keys().cloned().collect())
    }

    async fn entry_count(&self, partition: &str) -> CacheResult<usize> {
        let partitions = self.partitions.read().await;
        Ok(partitions.get(partition).map_or(0, HashMap::len))
    }
}
