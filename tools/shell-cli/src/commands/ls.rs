//! List cache partitions and their entries.

use anyhow::Result;
use serde::Serialize;

use shell_cache::{partition_keys, CacheStore, DiskStore};

use super::LsArgs;
use crate::output::Output;

#[derive(Serialize)]
struct PartitionSummary {
    name: String,
    entries: Vec<String>,
}

/// Run the ls command.
pub async fn run(args: LsArgs, output: &Output) -> Result<()> {
    let store = DiskStore::open_root(&args.cache_dir).await?;
    let names = store.partition_names().await?;

    if names.is_empty() {
        output.info("No cache partitions found.");
        output.info("Run `shellsw warm` to precache a site.");
        return Ok(());
    }

    let mut summaries = Vec::new();
    for name in names {
        let entries = partition_keys(&store, &name)
            .await?
            .into_iter()
            .map(|key| key.as_str().to_string())
            .collect();
        summaries.push(PartitionSummary { name, entries });
    }

    if output.is_json() {
        output.json(&summaries);
        return Ok(());
    }

    output.header("Cache partitions");
    for summary in summaries {
        output.kv(&summary.name, &format!("{} entries", summary.entries.len()));
        for entry in summary.entries {
            output.list_item(&entry);
        }
    }

    Ok(())
}
