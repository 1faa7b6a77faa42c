//! The `Cluster` API object.

use clusterforge_asset::{Asset, BoxedError, Parents};
use clusterforge_installconfig::{InstallConfigAsset, InstallContext};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterObject {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    spec: ClusterSpec,
}

#[derive(Serialize)]
struct Metadata {
    name: String,
    namespace: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterSpec {
    cluster_network: ClusterNetwork,
}

#[derive(Serialize)]
struct ClusterNetwork {
    services: CidrBlocks,
    pods: CidrBlocks,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CidrBlocks {
    cidr_blocks: Vec<String>,
}

/// Builds the `Cluster` object YAML from the install config. Pure
/// computation node; the bytes are picked up by the addon manifest bundle.
#[derive(Debug, Default)]
pub struct ClusterManifest {
    raw: Vec<u8>,
}

impl ClusterManifest {
    /// The serialized `Cluster` object.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

impl Asset<InstallContext> for ClusterManifest {
    fn name(&self) -> &'static str {
        "Cluster Manifest"
    }

    fn dependencies(&self) -> Vec<Box<dyn Asset<InstallContext>>> {
        vec![Box::new(InstallConfigAsset::default())]
    }

    fn generate(
        &mut self,
        _ctx: &InstallContext,
        parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        let config = parents.get::<InstallConfigAsset>()?.try_config()?;

        let cluster = ClusterObject {
            api_version: "cluster.k8s.io/v1alpha1",
            kind: "Cluster",
            metadata: Metadata {
                name: config.metadata.name.clone(),
                namespace: "cluster-api",
            },
            spec: ClusterSpec {
                cluster_network: ClusterNetwork {
                    services: CidrBlocks {
                        cidr_blocks: vec![config.networking.service_cidr.clone()],
                    },
                    pods: CidrBlocks {
                        cidr_blocks: vec![config.networking.pod_cidr.clone()],
                    },
                },
            },
        };

        self.raw = serde_yaml::to_string(&cluster)?.into_bytes();
        Ok(())
    }
}
