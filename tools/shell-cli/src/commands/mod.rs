//! CLI subcommands.

pub mod drill;
pub mod ls;
pub mod warm;

use std::path::PathBuf;

use clap::Args;

/// Arguments for `shellsw warm`.
#[derive(Args)]
pub struct WarmArgs {
    /// Worker config file (TOML); defaults to shellsw.toml if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Built site directory served as the network
    #[arg(short, long, default_value = "dist")]
    pub site: PathBuf,

    /// Cache directory
    #[arg(long, default_value = ".shellsw/cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for `shellsw ls`.
#[derive(Args)]
pub struct LsArgs {
    /// Cache directory
    #[arg(long, default_value = ".shellsw/cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for `shellsw drill`.
#[derive(Args)]
pub struct DrillArgs {
    /// Worker config file (TOML); defaults to shellsw.toml if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Cache directory
    #[arg(long, default_value = ".shellsw/cache")]
    pub cache_dir: PathBuf,

    /// Request paths to replay (e.g. / /admin /icon-192.png)
    #[arg(required = true)]
    pub paths: Vec<String>,
}
