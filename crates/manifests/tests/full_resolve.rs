//! End-to-end resolution of the addon manifest bundle.
//!
//! Drives a real `Store` from prompt answers to the final `manifests/` tree
//! and checks the side-effect guarantees: shared prompt-backed assets are
//! asked exactly once per run, and every output path is unique.

use clusterforge_asset::{Asset, DiskFetcher, Store};
use clusterforge_aws::{AwsProvider, Credentials, StaticCredentials};
use clusterforge_installconfig::{InstallConfigAsset, InstallContext};
use clusterforge_libvirt::{LibvirtProvider, StaticImage};
use clusterforge_manifests::{AddonManifests, CLUSTER_CONFIG_PATH};
use clusterforge_openstack::{OpenstackProvider, StaticClouds};
use clusterforge_prompt::{Answers, Overrides, PromptError, Question, ValueProvider};
use clusterforge_types::PlatformRegistry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how often each question id is resolved before delegating.
struct Counting {
    hits: Arc<CountingHits>,
    inner: Overrides,
}

#[derive(Default)]
struct CountingHits {
    total: AtomicUsize,
    platform: AtomicUsize,
}

impl ValueProvider for Counting {
    fn provide(&self, question: &Question) -> Result<Option<String>, PromptError> {
        self.hits.total.fetch_add(1, Ordering::SeqCst);
        if question.id == "platform" {
            self.hits.platform.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.provide(question)
    }
}

fn answers() -> HashMap<String, String> {
    HashMap::from([
        ("cluster-name".to_string(), "prod".to_string()),
        ("base-domain".to_string(), "example.com".to_string()),
        ("pull-secret".to_string(), r#"{"auths":{}}"#.to_string()),
        ("platform".to_string(), "aws".to_string()),
        ("aws-region".to_string(), "eu-west-1".to_string()),
    ])
}

fn context(hits: Arc<CountingHits>) -> InstallContext {
    let clouds = Arc::new(StaticClouds(b"clouds: {}".to_vec()));
    let mut platforms = PlatformRegistry::new();
    platforms.register(Arc::new(AwsProvider));
    platforms.register(Arc::new(OpenstackProvider::new(clouds.clone())));
    platforms.register(Arc::new(LibvirtProvider::new(Arc::new(StaticImage(
        "https://example.com/base.qcow2".to_string(),
    )))));
    InstallContext {
        answers: Answers::new(vec![Box::new(Counting {
            hits,
            inner: Overrides::new(answers()),
        })]),
        platforms,
        credentials: Arc::new(StaticCredentials(Credentials {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
        })),
        clouds,
    }
}

#[test]
fn platform_is_asked_exactly_once_for_the_whole_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let hits = Arc::new(CountingHits::default());
    let ctx = context(hits.clone());
    let mut store: Store<InstallContext> = Store::new(Box::new(DiskFetcher::new(dir.path())));

    store.resolve::<AddonManifests>(&ctx).unwrap();
    assert_eq!(hits.platform.load(Ordering::SeqCst), 1);

    // A second resolve against the same store is fully memoized.
    let before = hits.total.load(Ordering::SeqCst);
    store.resolve::<AddonManifests>(&ctx).unwrap();
    assert_eq!(hits.total.load(Ordering::SeqCst), before);
}

#[test]
fn bundle_and_install_config_share_one_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let hits = Arc::new(CountingHits::default());
    let ctx = context(hits.clone());
    let mut store: Store<InstallContext> = Store::new(Box::new(DiskFetcher::new(dir.path())));

    store.resolve::<AddonManifests>(&ctx).unwrap();
    let config = store.get::<InstallConfigAsset>().unwrap().config().unwrap();
    assert_eq!(config.metadata.name, "prod");
    assert_eq!(hits.platform.load(Ordering::SeqCst), 1);
}

#[test]
fn output_paths_are_unique_and_include_the_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(Arc::new(CountingHits::default()));
    let mut store: Store<InstallContext> = Store::new(Box::new(DiskFetcher::new(dir.path())));

    let files = store.resolve::<AddonManifests>(&ctx).unwrap().files();
    let paths: Vec<_> = files.iter().map(|f| f.filename.clone()).collect();
    let unique: HashSet<_> = paths.iter().collect();
    assert_eq!(unique.len(), paths.len());
    assert_eq!(paths[0].to_string_lossy(), CLUSTER_CONFIG_PATH);
}
