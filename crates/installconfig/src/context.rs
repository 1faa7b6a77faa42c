//! The collaborator context shared by one installation run.

use clusterforge_aws::CredentialsSource;
use clusterforge_openstack::CloudsSource;
use clusterforge_prompt::Answers;
use clusterforge_types::PlatformRegistry;
use std::sync::Arc;

/// Everything asset generation may consult besides its resolved parents:
/// the layered answer source, the platform provider table, and the cloud
/// credential collaborators.
///
/// Built once per run by the caller and passed through the store untouched;
/// no asset reaches for ambient process state.
pub struct InstallContext {
    /// Layered answer resolution (overrides first, interactive last).
    pub answers: Answers,
    /// Registered platform providers.
    pub platforms: PlatformRegistry,
    /// AWS credential lookup, used for the cloud-creds secret.
    pub credentials: Arc<dyn CredentialsSource>,
    /// clouds.yaml access, used for OpenStack credentials.
    pub clouds: Arc<dyn CloudsSource>,
}
