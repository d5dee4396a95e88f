//! Warm the cache from a built site directory.

use std::sync::Arc;

use anyhow::{bail, Result};

use shell_cache::{CacheStore, DiskStore};
use shell_worker::CacheController;

use super::WarmArgs;
use crate::adapter::{load_config, DirNetwork, NullHost};
use crate::output::Output;

/// Run the warm command.
pub async fn run(args: WarmArgs, output: &Output) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if !args.site.is_dir() {
        bail!("site directory {} does not exist", args.site.display());
    }

    output.header(&format!("Warming offline shell cache ({})", config.version));
    output.kv("site", &args.site.display().to_string());
    output.kv("cache", &args.cache_dir.display().to_string());

    let store: Arc<DiskStore> = Arc::new(DiskStore::open_root(&args.cache_dir).await?);
    let network = Arc::new(DirNetwork::new(&args.site));
    let names = config.partition_names();

    let controller = CacheController::new(config, store.clone(), network, Arc::new(NullHost));
    controller.on_install().await?;
    controller.on_activate().await?;

    output.header("Partitions");
    for name in names.all() {
        let count = store.entry_count(name).await?;
        output.kv(name, &format!("{count} entries"));
    }

    output.success("cache warmed");
    Ok(())
}
