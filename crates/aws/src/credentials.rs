//! Credential lookup collaborator.

use clusterforge_asset::BoxedError;
use std::fmt;

/// An AWS access key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret.
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

/// Opaque credential lookup, invoked from within asset generation.
///
/// The engine treats this as a black box; retry and timeout policy belong to
/// the implementation, not the caller.
pub trait CredentialsSource {
    /// Retrieve the active credentials.
    fn credentials(&self) -> Result<Credentials, BoxedError>;
}

/// [`CredentialsSource`] reading the standard AWS environment variables.
#[derive(Debug, Default)]
pub struct EnvCredentials;

impl CredentialsSource for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, BoxedError> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| "AWS_ACCESS_KEY_ID is not set")?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| "AWS_SECRET_ACCESS_KEY is not set")?;
        Ok(Credentials {
            access_key_id,
            secret_access_key,
        })
    }
}

/// Fixed credentials, for tests and air-gapped runs.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl CredentialsSource for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, BoxedError> {
        Ok(self.0.clone())
    }
}
