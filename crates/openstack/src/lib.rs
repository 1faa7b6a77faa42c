//! OpenStack platform provider for clusterforge.
//!
//! Registers under [`PlatformKind::Openstack`](clusterforge_types::PlatformKind)
//! and collects region, base image, cloud name (validated against the
//! operator's clouds.yaml) and external network. The clouds.yaml itself is
//! the [`CloudsSource`] collaborator, reused by manifest generation for the
//! credentials secret.

mod clouds;
mod networks;
mod provider;

pub use clouds::{CloudEntry, CloudsSource, CloudsYaml, FileClouds, StaticClouds};
pub use networks::{NetworkSource, StaticNetworks};
pub use provider::{
    external_network_question, image_question, region_question, OpenstackProvider,
    DEFAULT_BASE_IMAGE, DEFAULT_REGION,
};
