//! Disk-backed partition store.
//!
//! Persists each partition as one JSON snapshot file under a root
//! directory. This is the store the CLI uses so warmed caches survive
//! between runs; it is not meant to be fast, and it rewrites the whole
//! partition file on every put.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use shell_core::{CacheKey, FetchResponse};

use crate::error::{CacheError, CacheResult};
use crate::snapshot::ResponseSnapshot;
use crate::store::CacheStore;

type PartitionFile = BTreeMap<String, ResponseSnapshot>;

/// `CacheStore` implementation over a directory of JSON files.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub async fn open_root(root: impl Into<PathBuf>) -> CacheResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "disk cache store opened");
        Ok(Self { root })
    }

    fn partition_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    async fn read_partition(&self, name: &str) -> CacheResult<Option<PartitionFile>> {
        let path = self.partition_path(name);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_partition(&self, name: &str, entries: &PartitionFile) -> CacheResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        fs::write(self.partition_path(name), bytes)
            .await
            .map_err(|err| CacheError::Open {
                partition: name.to_string(),
                reason: err.to_string(),
            })
    }
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn open(&self, partition: &str) -> CacheResult<()> {
        if self.read_partition(partition).await?.is_none() {
            self.write_partition(partition, &PartitionFile::new()).await?;
        }
        Ok(())
    }

    async fn put(
        &self,
        partition: &str,
        key: &CacheKey,
        response: FetchResponse,
    ) -> CacheResult<()> {
        let mut entries = self.read_partition(partition).await?.unwrap_or_default();
        entries.insert(key.as_str().to_string(), ResponseSnapshot::from(&response));
        self.write_partition(partition, &entries).await
    }

    async fn lookup(&self, partition: &str, key: &CacheKey) -> CacheResult<Option<FetchResponse>> {
        let Some(entries) = self.read_partition(partition).await? else {
            return Ok(None);
        };
        Ok(entries
            .get(key.as_str())
            .cloned()
            .map(ResponseSnapshot::into_response))
    }

    async fn lookup_any(&self, key: &CacheKey) -> CacheResult<Option<FetchResponse>> {
        for name in self.partition_names().await? {
            if let Some(response) = self.lookup(&name, key).await? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }

    async fn delete_partition(&self, name: &str) -> CacheResult<bool> {
        match fs::remove_file(self.partition_path(name)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn partition_names(&self) -> CacheResult<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = fs::read_dir(&self.root).await?;
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn entry_count(&self, partition: &str) -> CacheResult<usize> {
        Ok(self
            .read_partition(partition)
            .await?
            .map_or(0, |entries| entries.len()))
    }
}

/// List the cache keys stored in one partition, in sorted order.
///
/// Only the disk store needs enumeration (for the CLI `ls` command), so
/// this lives outside the `CacheStore` trait.
pub async fn partition_keys(store: &DiskStore, partition: &str) -> CacheResult<Vec<CacheKey>> {
    Ok(store
        .read_partition(partition)
        .await?
        .map(|entries| entries.keys().map(CacheKey::from_raw).collect())
        .unwrap_or_default())
}
