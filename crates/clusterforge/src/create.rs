//! The `create` subcommands: resolve a target asset and write its files.

use crate::cli::Target;
use crate::env;
use clusterforge_asset::{Asset, DiskFetcher, File, FileMap, Store};
use clusterforge_aws::{AwsProvider, EnvCredentials};
use clusterforge_installconfig::{InstallConfigAsset, InstallContext};
use clusterforge_libvirt::{ChannelImage, LibvirtProvider};
use clusterforge_manifests::AddonManifests;
use clusterforge_openstack::{CloudsSource, FileClouds, OpenstackProvider};
use clusterforge_prompt::{Answers, Interactive};
use clusterforge_types::PlatformRegistry;
use miette::IntoDiagnostic;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Dispatch one `create` invocation.
pub fn run(target: &Target) -> miette::Result<()> {
    match target {
        Target::InstallConfig(args) => create::<InstallConfigAsset>(&args.dir),
        Target::Manifests(args) => create::<AddonManifests>(&args.dir),
    }
}

fn create<T: Asset<InstallContext> + Default>(dir: &Path) -> miette::Result<()> {
    let ctx = build_context();
    let mut store: Store<InstallContext> = Store::new(Box::new(DiskFetcher::new(dir)));
    let asset = store.resolve::<T>(&ctx).map_err(miette::Report::new)?;

    let mut map = FileMap::new();
    map.extend(asset.name(), asset.files())
        .map_err(miette::Report::new)?;
    write_files(dir, map.into_files())
}

/// Assemble the collaborator context for one run: environment overrides
/// layered over the interactive terminal, all shipped platform providers,
/// and the default cloud collaborators.
fn build_context() -> InstallContext {
    let clouds: Arc<dyn CloudsSource> = Arc::new(FileClouds::default());
    let mut platforms = PlatformRegistry::new();
    platforms.register(Arc::new(AwsProvider));
    platforms.register(Arc::new(OpenstackProvider::new(clouds.clone())));
    platforms.register(Arc::new(LibvirtProvider::new(Arc::new(ChannelImage))));

    InstallContext {
        answers: Answers::new(vec![
            Box::new(env::from_env()),
            Box::new(Interactive::new(std::io::stdin().lock(), std::io::stderr())),
        ]),
        platforms,
        credentials: Arc::new(EnvCredentials),
        clouds,
    }
}

fn write_files(dir: &Path, files: Vec<File>) -> miette::Result<()> {
    for file in files {
        let path = dir.join(&file.filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).into_diagnostic()?;
        }
        std::fs::write(&path, &file.data).into_diagnostic()?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_files_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_files(
            dir.path(),
            vec![
                File::new("install-config.yaml", "a: 1\n"),
                File::new("manifests/00_cluster-config.yaml", "b: 2\n"),
            ],
        )
        .unwrap();

        assert!(dir.path().join("install-config.yaml").is_file());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("manifests/00_cluster-config.yaml")).unwrap(),
            "b: 2\n"
        );
    }
}
