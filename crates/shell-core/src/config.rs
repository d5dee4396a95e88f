//! Controller configuration.
//!
//! Everything the worker script used to hard-code at module level (cache
//! names, precache manifests, asset extension and CDN allowlists) is carried
//! here instead, so a controller can be constructed with fakes in tests and
//! loaded from a config file by the CLI.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

/// Configuration for a cache controller version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Version suffix for partition names. Bumping this is the only
    /// supported cache-invalidation mechanism.
    #[serde(default = "default_version")]
    pub version: String,

    /// Origin used to resolve manifest paths into full URLs.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// App-shell documents precached into the primary partition.
    #[serde(default = "default_app_shell")]
    pub app_shell: Vec<String>,

    /// Static assets precached into the static partition.
    #[serde(default = "default_static_assets")]
    pub static_assets: Vec<String>,

    /// Path extensions routed cache-first.
    #[serde(default = "default_asset_extensions")]
    pub asset_extensions: Vec<String>,

    /// CDN hosts routed cache-first (suffix match).
    #[serde(default = "default_cdn_hosts")]
    pub cdn_hosts: Vec<String>,

    /// Document served for offline navigations with no cached copy.
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: String,

    /// Annotate served responses with an `x-cache-status` debug header.
    #[serde(default)]
    pub debug_headers: bool,
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_origin() -> String {
    "https://localhost".to_string()
}

fn default_app_shell() -> Vec<String> {
    [
        "/",
        "/admin",
        "/diagnostico",
        "/enhanced",
        "/manifest.json",
        "/offline.html",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_static_assets() -> Vec<String> {
    ["/favicon.ico", "/icon-192.png", "/icon-512.png"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_asset_extensions() -> Vec<String> {
    [
        ".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".woff", ".woff2",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_cdn_hosts() -> Vec<String> {
    ["cdn.tailwindcss.com", "gstatic.com"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_offline_fallback() -> String {
    "/".to_string()
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            origin: default_origin(),
            app_shell: default_app_shell(),
            static_assets: default_static_assets(),
            asset_extensions: default_asset_extensions(),
            cdn_hosts: default_cdn_hosts(),
            offline_fallback: default_offline_fallback(),
            debug_headers: false,
        }
    }
}

impl WorkerConfig {
    /// Create a config for a given version with default manifests.
    pub fn for_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set the origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Replace the app-shell manifest.
    pub fn with_app_shell(mut self, paths: Vec<&str>) -> Self {
        self.app_shell = paths.into_iter().map(String::from).collect();
        self
    }

    /// Replace the static asset manifest.
    pub fn with_static_assets(mut self, paths: Vec<&str>) -> Self {
        self.static_assets = paths.into_iter().map(String::from).collect();
        self
    }

    /// Resolve a manifest path against the configured origin.
    pub fn resolve(&self, path: &str) -> Result<Url, CoreError> {
        let base = Url::parse(&self.origin)?;
        Ok(base.join(path)?)
    }

    /// Partition names for this config's version.
    pub fn partition_names(&self) -> PartitionNames {
        PartitionNames::for_version(&self.version)
    }

    /// Whether a path ends in one of the configured asset extensions.
    pub fn is_asset_path(&self, path: &str) -> bool {
        self.asset_extensions.iter().any(|ext| path.ends_with(ext))
    }

    /// Whether a host matches the CDN allowlist (exact or suffix match).
    pub fn is_cdn_host(&self, host: &str) -> bool {
        self.cdn_hosts
            .iter()
            .any(|cdn| host == cdn || host.ends_with(&format!(".{cdn}")))
    }
}

/// The named cache partitions for one controller version.
///
/// Names are stable for the lifetime of a version; a new version creates
/// differently-named partitions and prunes the rest on activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionNames {
    /// Application shell documents.
    pub primary: String,
    /// Fingerprinted static assets.
    pub statics: String,
    /// Reserved for API responses; opened but never written.
    pub api: String,
}

impl PartitionNames {
    /// Derive partition names from a version suffix.
    pub fn for_version(version: &str) -> Self {
        Self {
            primary: format!("app-shell-{version}"),
            statics: format!("static-assets-{version}"),
            api: format!("api-cache-{version}"),
        }
    }

    /// All current names.
    pub fn all(&self) -> [&str; 3] {
        [&self.primary, &self.statics, &self.api]
    }

    /// Whether a partition name belongs to this version.
    pub fn contains(&self, name: &str) -> bool {
        self.all().contains(&name)
    }
}
