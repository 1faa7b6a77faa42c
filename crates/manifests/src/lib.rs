//! Manifest assets for clusterforge.
//!
//! Hosts the built-in template source assets, the strict rendering helper,
//! the `Cluster` object manifest, and the [`AddonManifests`] composite that
//! merges everything into the `manifests/` output tree.

pub mod addons;
pub mod cluster;
pub mod template;
pub mod templates;

pub use addons::{
    AddonManifests, ConfigurationMetadata, ConfigurationObject, ADDON_OPERATOR_IMAGE,
    CLUSTER_CONFIG_PATH, MANIFEST_DIR,
};
pub use cluster::ClusterManifest;
pub use template::render;
