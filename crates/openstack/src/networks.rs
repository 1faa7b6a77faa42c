//! Network listing collaborator.

use clusterforge_asset::BoxedError;

/// Lists the external networks visible to one cloud entry.
///
/// Stands in for the neutron network query; implementations own their own
/// connection and retry policy.
pub trait NetworkSource {
    /// Names of the external networks the given cloud can attach to.
    fn external_networks(&self, cloud: &str) -> Result<Vec<String>, BoxedError>;
}

/// Fixed network list, for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticNetworks(pub Vec<String>);

impl NetworkSource for StaticNetworks {
    fn external_networks(&self, _cloud: &str) -> Result<Vec<String>, BoxedError> {
        Ok(self.0.clone())
    }
}
