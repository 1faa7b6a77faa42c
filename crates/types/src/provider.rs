//! Platform provider lookup table.

use crate::platform::{Platform, PlatformKind};
use clusterforge_asset::BoxedError;
use clusterforge_prompt::Answers;
use miette::Diagnostic;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Collects one platform's configuration, asking questions as needed.
///
/// One implementation per [`PlatformKind`], shipped in its own crate and
/// registered into a [`PlatformRegistry`]; adding a platform is a local
/// extension rather than a scattered switch.
pub trait PlatformProvider {
    /// The kind this provider handles.
    fn kind(&self) -> PlatformKind;

    /// Resolve the platform's questions through `answers` and return the
    /// finished configuration.
    fn collect(&self, answers: &Answers) -> Result<Platform, BoxedError>;
}

/// Error raised when a platform has no registered provider.
#[derive(Debug, Error, Diagnostic)]
#[error("no provider registered for platform '{kind}'")]
#[diagnostic(code(clusterforge_types::provider::unknown))]
pub struct UnknownPlatform {
    /// The unhandled platform kind.
    pub kind: PlatformKind,
}

/// Lookup table from platform kind to its provider.
#[derive(Default)]
pub struct PlatformRegistry {
    providers: HashMap<PlatformKind, Arc<dyn PlatformProvider>>,
}

impl PlatformRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own kind, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn PlatformProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    /// Look up the provider for a kind.
    #[must_use]
    pub fn get(&self, kind: PlatformKind) -> Option<Arc<dyn PlatformProvider>> {
        self.providers.get(&kind).cloned()
    }

    /// Registered kinds in presentation order.
    #[must_use]
    pub fn kinds(&self) -> Vec<PlatformKind> {
        PlatformKind::ALL
            .into_iter()
            .filter(|kind| self.providers.contains_key(kind))
            .collect()
    }

    /// Wire names of the registered kinds, in presentation order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.kinds()
            .into_iter()
            .map(|kind| kind.name().to_string())
            .collect()
    }

    /// Collect the configuration for `kind` through its registered provider.
    pub fn collect(&self, kind: PlatformKind, answers: &Answers) -> Result<Platform, BoxedError> {
        let provider = self.get(kind).ok_or(UnknownPlatform { kind })?;
        provider.collect(answers)
    }
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LibvirtNetwork, LibvirtPlatform};

    struct FixedLibvirt;

    impl PlatformProvider for FixedLibvirt {
        fn kind(&self) -> PlatformKind {
            PlatformKind::Libvirt
        }

        fn collect(&self, _answers: &Answers) -> Result<Platform, BoxedError> {
            Ok(Platform::Libvirt(LibvirtPlatform {
                uri: "qemu+tcp://192.168.122.1/system".to_string(),
                network: LibvirtNetwork::default(),
                default_machine_platform: None,
            }))
        }
    }

    #[test]
    fn registry_resolves_registered_kinds_only() {
        let mut registry = PlatformRegistry::new();
        registry.register(Arc::new(FixedLibvirt));

        assert_eq!(registry.kinds(), vec![PlatformKind::Libvirt]);
        assert_eq!(registry.names(), vec!["libvirt".to_string()]);

        let answers = Answers::new(vec![]);
        let platform = registry.collect(PlatformKind::Libvirt, &answers).unwrap();
        assert_eq!(platform.kind(), PlatformKind::Libvirt);

        let err = registry.collect(PlatformKind::Aws, &answers).unwrap_err();
        assert!(err.to_string().contains("aws"));
    }
}
