//! AWS platform provider for clusterforge.
//!
//! Registers under [`PlatformKind::Aws`](clusterforge_types::PlatformKind)
//! and collects the region (validated against the documented region list)
//! and optional user tags. Credential lookup for manifest generation is the
//! [`CredentialsSource`] collaborator.

mod credentials;
mod provider;
mod regions;

pub use credentials::{Credentials, CredentialsSource, EnvCredentials, StaticCredentials};
pub use provider::{region_question, user_tags_question, AwsProvider};
pub use regions::{region_ids, DEFAULT_REGION, REGIONS};
