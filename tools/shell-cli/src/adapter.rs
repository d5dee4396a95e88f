//! Local adapters standing in for the browser runtime.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use http::StatusCode;
use tokio::fs;

use shell_core::{FetchRequest, FetchResponse, WorkerConfig};
use shell_worker::{HostRuntime, Network, NetworkError};

/// Serves files from a built site directory as "the network".
///
/// Paths resolve the way a static host would: `/` maps to `index.html`,
/// extensionless paths try `<path>.html` then `<path>/index.html`.
pub struct DirNetwork {
    root: PathBuf,
}

impl DirNetwork {
    /// Create a network over a site directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() || trimmed.ends_with('/') {
            return vec![self.root.join(trimmed).join("index.html")];
        }

        vec![
            self.root.join(trimmed),
            self.root.join(format!("{trimmed}.html")),
            self.root.join(trimmed).join("index.html"),
        ]
    }
}

#[async_trait]
impl Network for DirNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
        for candidate in self.candidates(request.path()) {
            match fs::read(&candidate).await {
                Ok(bytes) => {
                    return Ok(FetchResponse::ok(bytes)
                        .with_header("content-type", content_type(&candidate)));
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(NetworkError::Io(err.to_string())),
            }
        }

        Ok(FetchResponse::ok("not found").with_status(StatusCode::NOT_FOUND))
    }
}

/// A network with no connectivity; every fetch fails.
pub struct OfflineNetwork;

#[async_trait]
impl Network for OfflineNetwork {
    async fn fetch(&self, _request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
        Err(NetworkError::Offline)
    }
}

/// Host runtime with no pages to control.
pub struct NullHost;

#[async_trait]
impl HostRuntime for NullHost {
    async fn skip_waiting(&self) {
        tracing::debug!("skip_waiting requested");
    }

    async fn claim_clients(&self) {
        tracing::debug!("claim_clients requested");
    }
}

/// Load a worker config from a TOML file, or defaults when none exists.
pub fn load_config(path: Option<&Path>) -> Result<WorkerConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from("shellsw.toml");
            if !default.exists() {
                return Ok(WorkerConfig::default());
            }
            default
        }
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("js" | "mjs") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
