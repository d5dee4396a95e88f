//! Replay requests against the warmed cache with the network off.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use shell_cache::DiskStore;
use shell_core::FetchRequest;
use shell_worker::{header_names, CacheController, FetchOutcome};

use super::DrillArgs;
use crate::adapter::{load_config, NullHost, OfflineNetwork};
use crate::output::{status_badge, Output};

#[derive(Serialize)]
struct DrillResult {
    path: String,
    status: String,
}

/// Run the drill command.
pub async fn run(args: DrillArgs, output: &Output) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    // Resolution status comes back on the debug header.
    config.debug_headers = true;

    let store: Arc<DiskStore> = Arc::new(DiskStore::open_root(&args.cache_dir).await?);
    let controller = CacheController::resume(
        config.clone(),
        store,
        Arc::new(OfflineNetwork),
        Arc::new(NullHost),
    );

    output.header(&format!(
        "Offline drill ({} requests, version {})",
        args.paths.len(),
        config.version
    ));

    let pb = output.progress(args.paths.len() as u64, "replaying");
    let mut results = Vec::new();
    let mut failures = 0usize;

    for path in &args.paths {
        let url = config.resolve(path)?;
        let request = if config.is_asset_path(path) {
            FetchRequest::get_url(url)
        } else {
            FetchRequest::navigation(url.as_str())?
        };

        let status = match controller.on_fetch(&request).await {
            FetchOutcome::Response(response) => response
                .headers
                .get(header_names::X_CACHE_STATUS)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("MISS")
                .to_string(),
            FetchOutcome::Failed(_) => "FAILED".to_string(),
            FetchOutcome::Passthrough => "PASSTHROUGH".to_string(),
        };

        if matches!(status.as_str(), "MISS" | "FAILED") {
            failures += 1;
        }
        results.push(DrillResult {
            path: path.clone(),
            status,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    if output.is_json() {
        output.json(&results);
        return Ok(());
    }

    for result in &results {
        output.list_item(&format!("{}  {}", result.path, status_badge(&result.status)));
    }

    if failures == 0 {
        output.success("all requests answered offline");
    } else {
        output.warn(&format!("{failures} request(s) not answerable offline"));
    }

    Ok(())
}
