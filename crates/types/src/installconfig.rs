//! The install-config document: everything needed to create a cluster.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};

/// Default CIDR block for cluster services.
pub const DEFAULT_SERVICE_CIDR: &str = "172.30.0.0/16";

/// Default CIDR block for pod networking.
pub const DEFAULT_POD_CIDR: &str = "10.128.0.0/14";

/// Default replica count for the control-plane pool.
pub const DEFAULT_MASTER_REPLICAS: u32 = 3;

/// Default replica count for the worker pool.
pub const DEFAULT_WORKER_REPLICAS: u32 = 3;

/// Top-level cluster configuration, persisted as `install-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    /// Cluster identity.
    pub metadata: ClusterMetadata,
    /// DNS base domain the cluster lives under.
    pub base_domain: String,
    /// Cluster-internal networking layout.
    pub networking: Networking,
    /// Machine pools, conventionally one `master` and one `worker` pool.
    pub machines: Vec<MachinePool>,
    /// The resolved platform configuration.
    pub platform: Platform,
    /// Registry pull secret, a JSON document.
    pub pull_secret: String,
}

/// Cluster identity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMetadata {
    /// Cluster name, used as the prefix for created resources.
    pub name: String,
}

/// Cluster-internal networking layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// CIDR block for service addresses.
    pub service_cidr: String,
    /// CIDR block for pod addresses.
    pub pod_cidr: String,
}

impl Default for Networking {
    fn default() -> Self {
        Self {
            service_cidr: DEFAULT_SERVICE_CIDR.to_string(),
            pod_cidr: DEFAULT_POD_CIDR.to_string(),
        }
    }
}

/// One pool of identically configured machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachinePool {
    /// Pool name, conventionally `master` or `worker`.
    pub name: String,
    /// Number of machines in the pool.
    pub replicas: u32,
}

impl MachinePool {
    /// The default control-plane pool.
    #[must_use]
    pub fn master() -> Self {
        Self {
            name: "master".to_string(),
            replicas: DEFAULT_MASTER_REPLICAS,
        }
    }

    /// The default worker pool.
    #[must_use]
    pub fn worker() -> Self {
        Self {
            name: "worker".to_string(),
            replicas: DEFAULT_WORKER_REPLICAS,
        }
    }
}
