//! Platform selection: one closed variant per supported platform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default CIDR block shared by the AWS VPC and OpenStack network configs.
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";

/// Default libvirt bridge interface name.
pub const DEFAULT_LIBVIRT_IF_NAME: &str = "tt0";

/// Default libvirt network IP range.
pub const DEFAULT_LIBVIRT_IP_RANGE: &str = "192.168.126.0/24";

/// The supported platform kinds.
///
/// This is a closed set: adding a platform means adding a variant here and a
/// provider crate registering for it, not editing scattered string switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Amazon Web Services.
    Aws,
    /// OpenStack.
    Openstack,
    /// Local libvirt/QEMU.
    Libvirt,
}

impl PlatformKind {
    /// Every supported kind, in presentation order.
    pub const ALL: [Self; 3] = [Self::Aws, Self::Libvirt, Self::Openstack];

    /// The lowercase wire name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Openstack => "openstack",
            Self::Libvirt => "libvirt",
        }
    }

    /// Parse a wire name back into a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The resolved platform configuration, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// AWS configuration.
    Aws(AwsPlatform),
    /// OpenStack configuration.
    Openstack(OpenstackPlatform),
    /// libvirt configuration.
    Libvirt(LibvirtPlatform),
}

impl Platform {
    /// The kind tag of this configuration.
    #[must_use]
    pub fn kind(&self) -> PlatformKind {
        match self {
            Self::Aws(_) => PlatformKind::Aws,
            Self::Openstack(_) => PlatformKind::Openstack,
            Self::Libvirt(_) => PlatformKind::Libvirt,
        }
    }
}

/// Global AWS configuration shared by all machine pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsPlatform {
    /// AWS region the cluster is created in.
    pub region: String,
    /// Additional tags applied to every created resource.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_tags: BTreeMap<String, String>,
    /// CIDR block of the cluster VPC.
    pub vpc_cidr_block: String,
}

/// Global OpenStack configuration shared by all machine pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenstackPlatform {
    /// OpenStack region the cluster is created in.
    pub region: String,
    /// Name of the base image to boot machines from.
    pub base_image: String,
    /// Cloud entry from clouds.yaml holding the credentials.
    pub cloud_name: String,
    /// External network used for installation.
    pub external_network: String,
    /// CIDR block of the cluster network.
    pub network_cidr_block: String,
    /// Defaults for machine pools that do not override them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_machine_platform: Option<OpenstackMachinePool>,
}

/// Per-pool OpenStack machine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenstackMachinePool {
    /// Flavor machines are booted with.
    #[serde(rename = "type")]
    pub flavor_name: String,
}

/// Global libvirt configuration shared by all machine pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibvirtPlatform {
    /// Connection URI, reachable from the running cluster.
    pub uri: String,
    /// Cluster network layout.
    pub network: LibvirtNetwork,
    /// Defaults for machine pools that do not override them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_machine_platform: Option<LibvirtMachinePool>,
}

/// libvirt network layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibvirtNetwork {
    /// Bridge interface name.
    pub if_name: String,
    /// IP range of the network.
    pub ip_range: String,
}

impl Default for LibvirtNetwork {
    fn default() -> Self {
        Self {
            if_name: DEFAULT_LIBVIRT_IF_NAME.to_string(),
            ip_range: DEFAULT_LIBVIRT_IP_RANGE.to_string(),
        }
    }
}

/// Per-pool libvirt machine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibvirtMachinePool {
    /// URL of the QCOW image machines boot from.
    pub image: String,
}
