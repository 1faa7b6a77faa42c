//! The install-config asset: the `install-config.yaml` document.

use crate::cluster::{BaseDomain, ClusterName, PullSecret};
use crate::context::InstallContext;
use crate::platform::PlatformSelection;
use clusterforge_asset::{Asset, BoxedError, File, FileFetcher, Parents};
use clusterforge_types::{ClusterMetadata, InstallConfig, MachinePool, Networking};
use std::path::Path;
use tracing::debug;

/// Relative path the install config is persisted under.
pub const INSTALL_CONFIG_FILENAME: &str = "install-config.yaml";

/// Materializes `install-config.yaml` from the prompt-backed assets, or
/// reconstitutes it from a previous run's state directory.
#[derive(Debug, Default)]
pub struct InstallConfigAsset {
    config: Option<InstallConfig>,
    file: Option<File>,
}

impl InstallConfigAsset {
    /// The resolved configuration.
    #[must_use]
    pub fn config(&self) -> Option<&InstallConfig> {
        self.config.as_ref()
    }

    /// The resolved configuration, or an error when the asset has not
    /// resolved.
    pub fn try_config(&self) -> Result<&InstallConfig, BoxedError> {
        self.config
            .as_ref()
            .ok_or_else(|| "install config has not been resolved".into())
    }
}

impl Asset<InstallContext> for InstallConfigAsset {
    fn name(&self) -> &'static str {
        "Install Config"
    }

    fn dependencies(&self) -> Vec<Box<dyn Asset<InstallContext>>> {
        vec![
            Box::new(ClusterName::default()),
            Box::new(BaseDomain::default()),
            Box::new(PullSecret::default()),
            Box::new(PlatformSelection::default()),
        ]
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, BoxedError> {
        let Some(file) = fetcher.fetch_exact(Path::new(INSTALL_CONFIG_FILENAME))? else {
            return Ok(false);
        };
        let config: InstallConfig = serde_yaml::from_slice(&file.data)
            .map_err(|err| format!("malformed {INSTALL_CONFIG_FILENAME}: {err}"))?;
        debug!("install config reconstituted from {}", INSTALL_CONFIG_FILENAME);
        self.config = Some(config);
        self.file = Some(file);
        Ok(true)
    }

    fn generate(
        &mut self,
        _ctx: &InstallContext,
        parents: &Parents<InstallContext>,
    ) -> Result<(), BoxedError> {
        let name = parents.get::<ClusterName>()?;
        let domain = parents.get::<BaseDomain>()?;
        let pull_secret = parents.get::<PullSecret>()?;
        let platform = parents.get::<PlatformSelection>()?.try_platform()?;

        let config = InstallConfig {
            metadata: ClusterMetadata {
                name: name.name().to_string(),
            },
            base_domain: domain.domain().to_string(),
            networking: Networking::default(),
            machines: vec![MachinePool::master(), MachinePool::worker()],
            platform: platform.clone(),
            pull_secret: pull_secret.secret().to_string(),
        };

        let yaml = serde_yaml::to_string(&config)?;
        self.file = Some(File::new(INSTALL_CONFIG_FILENAME, yaml));
        self.config = Some(config);
        Ok(())
    }

    fn files(&self) -> Vec<File> {
        self.file.iter().cloned().collect()
    }
}
