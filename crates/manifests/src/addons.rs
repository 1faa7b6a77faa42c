//! The addon manifest bundle.

use crate::cluster::ClusterManifest;
use crate::template::render;
use crate::templates::{
    AddonOperator, AppVersion, BindingAdmin, BindingDiscovery, CloudCredsSecret,
    PullSecretTemplate, RoleAdmin, RoleCloudCredsSecretReader, RoleUser,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use clusterforge_asset::{Asset, BoxedError, File, FileFetcher, FileMap, Parents};
use clusterforge_installconfig::{InstallConfigAsset, InstallContext};
use clusterforge_types::PlatformKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Directory all addon manifests are written under.
pub const MANIFEST_DIR: &str = "manifests";

/// The cluster-config sentinel. A manifest directory reconstitutes from disk
/// only when this file is present and parses.
pub const CLUSTER_CONFIG_PATH: &str = "manifests/00_cluster-config.yaml";

/// Image the addon operator deployment runs.
pub const ADDON_OPERATOR_IMAGE: &str = "quay.io/clusterforge/addon-operator:v0.3.1";

/// The `cluster-config-v1` ConfigMap written alongside the manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationObject {
    /// Kubernetes API version, always `v1`.
    pub api_version: String,
    /// Kubernetes kind, always `ConfigMap`.
    pub kind: String,
    /// Object name and namespace.
    pub metadata: ConfigurationMetadata,
    /// ConfigMap payload.
    pub data: BTreeMap<String, String>,
}

/// Name and namespace of the configuration object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationMetadata {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddonConfig {
    api_version: &'static str,
    kind: &'static str,
    cluster_name: String,
    base_domain: String,
}

#[derive(Serialize, Default)]
struct CloudCreds {
    aws: Option<AwsCredsData>,
    openstack: Option<OpenstackCredsData>,
}

#[derive(Serialize)]
struct AwsCredsData {
    access_key_id: String,
    secret_access_key: String,
}

#[derive(Serialize)]
struct OpenstackCredsData {
    clouds_yaml: String,
}

#[derive(Serialize)]
struct TemplateData {
    addon_operator_image: &'static str,
    pull_secret: String,
    cloud_creds: CloudCreds,
}

/// Composite bundle of the addon manifests: the cluster-config sentinel plus
/// one `99_*.yaml` per rendered or static artifact, merged through
/// [`FileMap`] so a path collision is fatal.
#[derive(Debug, Default)]
pub struct AddonManifests {
    config: Option<ConfigurationObject>,
    files: Vec<File>,
}

impl AddonManifests {
    /// The cluster-config object, once resolved.
    #[must_use]
    pub fn config(&self) -> Option<&ConfigurationObject> {
        self.config.as_ref()
    }
}

impl Asset<InstallContext> for AddonManifests {
    fn name(&self) -> &'static str {
        "Addon Manifests"
    }

    fn dependencies(&self) -> Vec<Box<dyn Asset<InstallContext>>> {
        vec![
            Box::new(InstallConfigAsset::default()),
            Box::new(ClusterManifest::default()),
            Box::new(BindingDiscovery::default()),
            Box::new(AppVersion::default()),
            Box::new(AddonOperator::default()),
            Box::new(RoleAdmin::default()),
            Box::new(RoleUser::default()),
            Box::new(BindingAdmin::default()),
            Box::new(PullSecretTemplate::default()),
            Box::new(CloudCredsSecret::default()),
            Box::new(RoleCloudCredsSecretReader::default()),
        ]
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, BoxedError> {
        let files = fetcher.fetch_by_pattern(&format!("{MANIFEST_DIR}/*"))?;
        if files.is_empty() {
            return Ok(false);
        }

        let Some(sentinel) = files
            .iter()
            .find(|file| file.filename == Path::new(CLUSTER_CONFIG_PATH))
        else {
            return Ok(false);
        };
        let config: ConfigurationObject = serde_yaml::from_slice(&sentinel.data)
            .map_err(|err| format!("malformed {CLUSTER_CONFIG_PATH}: {err}"))?;

        debug!(
            "addon manifests reconstituted from {} files under {}",
            files.len(),
            MANIFEST_DIR
        );
        self.config = Some(config);
        self.files = files;
        Ok(true)
    }

    fn generate(
        &mut self,
        ctx: &InstallContext,
        parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        let config = parents.get::<InstallConfigAsset>()?.try_config()?;
        let cluster = parents.get::<ClusterManifest>()?;
        let kind = config.platform.kind();

        // Cloud credentials are a total function of the resolved platform
        // kind; collaborators are only consulted on the branches that need
        // them.
        let cloud_creds = match kind {
            PlatformKind::Aws => {
                let creds = ctx.credentials.credentials()?;
                CloudCreds {
                    aws: Some(AwsCredsData {
                        access_key_id: BASE64.encode(creds.access_key_id),
                        secret_access_key: BASE64.encode(creds.secret_access_key),
                    }),
                    openstack: None,
                }
            }
            PlatformKind::Openstack => {
                let clouds = ctx.clouds.raw()?;
                CloudCreds {
                    aws: None,
                    openstack: Some(OpenstackCredsData {
                        clouds_yaml: BASE64.encode(clouds),
                    }),
                }
            }
            PlatformKind::Libvirt => CloudCreds::default(),
        };

        let data = TemplateData {
            addon_operator_image: ADDON_OPERATOR_IMAGE,
            pull_secret: BASE64.encode(config.pull_secret.as_bytes()),
            cloud_creds,
        };

        let addon_config = serde_yaml::to_string(&AddonConfig {
            api_version: "addons.clusterforge.dev/v1",
            kind: "AddonConfig",
            cluster_name: config.metadata.name.clone(),
            base_domain: config.base_domain.clone(),
        })?;
        let configuration = ConfigurationObject {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            metadata: ConfigurationMetadata {
                name: "cluster-config-v1".to_string(),
                namespace: "addon-system".to_string(),
            },
            data: BTreeMap::from([("addon-config".to_string(), addon_config)]),
        };

        let mut map = FileMap::new();
        map.insert(
            self.name(),
            File::new(CLUSTER_CONFIG_PATH, serde_yaml::to_string(&configuration)?),
        )?;

        let statics: [(&str, &[u8]); 5] = [
            (
                "99_binding-discovery.yaml",
                parents.get::<BindingDiscovery>()?.data(),
            ),
            (
                "99_addon-00-appversion.yaml",
                parents.get::<AppVersion>()?.data(),
            ),
            ("99_role-admin.yaml", parents.get::<RoleAdmin>()?.data()),
            ("99_role-user.yaml", parents.get::<RoleUser>()?.data()),
            (
                "99_addon-binding-admin.yaml",
                parents.get::<BindingAdmin>()?.data(),
            ),
        ];
        for (name, content) in statics {
            map.insert(self.name(), manifest_file(name, content.to_vec()))?;
        }

        map.insert(
            self.name(),
            manifest_file("99_cluster-api_cluster.yaml", cluster.raw().to_vec()),
        )?;

        let rendered: [(&str, &[u8]); 2] = [
            (
                "99_addon-01-operator.yaml",
                parents.get::<AddonOperator>()?.data(),
            ),
            (
                "99_addon-02-pull.yaml",
                parents.get::<PullSecretTemplate>()?.data(),
            ),
        ];
        for (name, source) in rendered {
            map.insert(self.name(), manifest_file(name, render(name, source, &data)?))?;
        }

        if matches!(kind, PlatformKind::Aws | PlatformKind::Openstack) {
            let creds: [(&str, &[u8]); 2] = [
                (
                    "99_cloud-creds-secret.yaml",
                    parents.get::<CloudCredsSecret>()?.data(),
                ),
                (
                    "99_role-cloud-creds-secret-reader.yaml",
                    parents.get::<RoleCloudCredsSecretReader>()?.data(),
                ),
            ];
            for (name, source) in creds {
                map.insert(self.name(), manifest_file(name, render(name, source, &data)?))?;
            }
        }

        self.config = Some(configuration);
        self.files = map.into_files();
        Ok(())
    }

    fn files(&self) -> Vec<File> {
        self.files.clone()
    }
}

fn manifest_file(name: &str, data: Vec<u8>) -> File {
    File::new(Path::new(MANIFEST_DIR).join(name), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterforge_asset::{DiskFetcher, Error, Store};
    use clusterforge_aws::{AwsProvider, Credentials, StaticCredentials};
    use clusterforge_libvirt::{LibvirtProvider, StaticImage};
    use clusterforge_openstack::StaticClouds;
    use clusterforge_prompt::{Answers, Overrides};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn context(overrides: HashMap<String, String>) -> InstallContext {
        let mut platforms = clusterforge_types::PlatformRegistry::new();
        platforms.register(Arc::new(AwsProvider));
        platforms.register(Arc::new(LibvirtProvider::new(Arc::new(StaticImage(
            "https://example.com/base.qcow2".to_string(),
        )))));
        InstallContext {
            answers: Answers::new(vec![Box::new(Overrides::new(overrides))]),
            platforms,
            credentials: Arc::new(StaticCredentials(Credentials {
                access_key_id: "AKIAEXAMPLE".to_string(),
                secret_access_key: "secret".to_string(),
            })),
            clouds: Arc::new(StaticClouds(b"clouds: {}".to_vec())),
        }
    }

    fn overrides(platform: &str) -> HashMap<String, String> {
        let mut values = HashMap::from([
            ("cluster-name".to_string(), "prod".to_string()),
            ("base-domain".to_string(), "example.com".to_string()),
            ("pull-secret".to_string(), r#"{"auths":{}}"#.to_string()),
            ("platform".to_string(), platform.to_string()),
        ]);
        if platform == "aws" {
            values.insert("aws-region".to_string(), "us-east-1".to_string());
        }
        values
    }

    fn filenames(files: &[File]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.filename.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn aws_bundle_includes_cloud_creds_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(overrides("aws"));
        let mut store: Store<InstallContext> =
            Store::new(Box::new(DiskFetcher::new(dir.path())));

        let asset = store.resolve::<AddonManifests>(&ctx).unwrap();
        let names = filenames(&asset.files());
        assert!(names.contains(&CLUSTER_CONFIG_PATH.to_string()));
        assert!(names.contains(&"manifests/99_cloud-creds-secret.yaml".to_string()));
        assert!(names.contains(&"manifests/99_role-cloud-creds-secret-reader.yaml".to_string()));

        let secret = asset
            .files()
            .into_iter()
            .find(|f| f.filename.ends_with("99_cloud-creds-secret.yaml"))
            .unwrap();
        let secret = String::from_utf8(secret.data).unwrap();
        assert!(secret.contains(&BASE64.encode("AKIAEXAMPLE")), "{secret}");
        assert!(!secret.contains("clouds.yaml"), "{secret}");
    }

    #[test]
    fn libvirt_bundle_omits_cloud_creds_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(overrides("libvirt"));
        let mut store: Store<InstallContext> =
            Store::new(Box::new(DiskFetcher::new(dir.path())));

        let asset = store.resolve::<AddonManifests>(&ctx).unwrap();
        let names = filenames(&asset.files());
        assert!(names.contains(&"manifests/99_addon-01-operator.yaml".to_string()));
        assert!(!names.iter().any(|n| n.contains("cloud-creds")));
    }

    #[test]
    fn rendered_manifests_have_no_residual_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(overrides("aws"));
        let mut store: Store<InstallContext> =
            Store::new(Box::new(DiskFetcher::new(dir.path())));

        let asset = store.resolve::<AddonManifests>(&ctx).unwrap();
        for file in asset.files() {
            let text = String::from_utf8(file.data).unwrap();
            assert!(!text.contains("{{"), "{}: {text}", file.filename.display());
        }

        let operator = asset
            .files()
            .into_iter()
            .find(|f| f.filename.ends_with("99_addon-01-operator.yaml"))
            .unwrap();
        assert!(
            String::from_utf8(operator.data)
                .unwrap()
                .contains(ADDON_OPERATOR_IMAGE)
        );
    }

    #[test]
    fn bundle_reconstitutes_only_when_the_sentinel_parses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MANIFEST_DIR)).unwrap();
        // A stray manifest without the sentinel does not count as state.
        std::fs::write(dir.path().join("manifests/99_leftover.yaml"), "kind: X").unwrap();

        let ctx = context(overrides("libvirt"));
        let mut store: Store<InstallContext> =
            Store::new(Box::new(DiskFetcher::new(dir.path())));
        let asset = store.resolve::<AddonManifests>(&ctx).unwrap();
        // Generated fresh: the sentinel is present in the output.
        assert!(filenames(&asset.files()).contains(&CLUSTER_CONFIG_PATH.to_string()));
    }

    #[test]
    fn malformed_sentinel_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MANIFEST_DIR)).unwrap();
        std::fs::write(
            dir.path().join(CLUSTER_CONFIG_PATH),
            "data: [not, a, mapping",
        )
        .unwrap();

        let ctx = context(overrides("libvirt"));
        let mut store: Store<InstallContext> =
            Store::new(Box::new(DiskFetcher::new(dir.path())));
        let err = store.resolve::<AddonManifests>(&ctx).unwrap_err();
        assert!(matches!(err, Error::Load { asset: "Addon Manifests", .. }));
    }

    #[test]
    fn persisted_bundle_is_reused() {
        let dir = tempfile::tempdir().unwrap();

        let first = {
            let ctx = context(overrides("libvirt"));
            let mut store: Store<InstallContext> =
                Store::new(Box::new(DiskFetcher::new(dir.path())));
            let asset = store.resolve::<AddonManifests>(&ctx).unwrap();
            for file in asset.files() {
                let path = dir.path().join(&file.filename);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, &file.data).unwrap();
            }
            asset.config().unwrap().clone()
        };

        let ctx = context(overrides("libvirt"));
        let mut store: Store<InstallContext> =
            Store::new(Box::new(DiskFetcher::new(dir.path())));
        let asset = store.resolve::<AddonManifests>(&ctx).unwrap();
        assert_eq!(asset.config().unwrap(), &first);
    }
}
