//! Install-config data model for clusterforge.
//!
//! Defines the serializable cluster configuration ([`InstallConfig`] and
//! friends), the closed [`Platform`] variant over supported platform kinds,
//! and the [`PlatformProvider`] registry that platform crates plug into.

mod installconfig;
mod platform;
mod provider;

pub use installconfig::{
    ClusterMetadata, InstallConfig, MachinePool, Networking, DEFAULT_MASTER_REPLICAS,
    DEFAULT_POD_CIDR, DEFAULT_SERVICE_CIDR, DEFAULT_WORKER_REPLICAS,
};
pub use platform::{
    AwsPlatform, LibvirtMachinePool, LibvirtNetwork, LibvirtPlatform, OpenstackMachinePool,
    OpenstackPlatform, Platform, PlatformKind, DEFAULT_LIBVIRT_IF_NAME, DEFAULT_LIBVIRT_IP_RANGE,
    DEFAULT_VPC_CIDR,
};
pub use provider::{PlatformProvider, PlatformRegistry, UnknownPlatform};
