//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Resolves and materializes cluster installation assets.
#[derive(Debug, Parser)]
#[command(name = "clusterforge", version, about)]
pub struct Cli {
    /// Log level filter when RUST_LOG is not set.
    #[arg(long, short = 'v', global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate installation assets into the state directory.
    Create {
        #[command(subcommand)]
        target: Target,
    },
}

/// Which asset tree to materialize.
#[derive(Debug, Subcommand)]
pub enum Target {
    /// Generate `install-config.yaml`.
    InstallConfig(TargetArgs),
    /// Generate the cluster and addon manifests.
    Manifests(TargetArgs),
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// State directory: previously generated assets are read from here and
    /// new assets are written here.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}
