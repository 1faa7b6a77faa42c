//! Install-config assets for clusterforge.
//!
//! This crate owns the prompt-backed identity assets (cluster name, base
//! domain, pull secret), the platform selection asset, and the
//! [`InstallConfigAsset`] that ties them together into the persisted
//! `install-config.yaml` document. It also defines [`InstallContext`], the
//! collaborator bundle every generation step receives.

pub mod asset;
pub mod cluster;
pub mod context;
pub mod platform;

pub use asset::{InstallConfigAsset, INSTALL_CONFIG_FILENAME};
pub use cluster::{BaseDomain, ClusterName, PullSecret};
pub use context::InstallContext;
pub use platform::PlatformSelection;
