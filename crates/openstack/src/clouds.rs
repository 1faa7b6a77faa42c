//! clouds.yaml collaborator.

use clusterforge_asset::BoxedError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The parsed shape of a clouds.yaml document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudsYaml {
    /// Named cloud entries.
    #[serde(default)]
    pub clouds: BTreeMap<String, CloudEntry>,
}

/// One cloud entry from clouds.yaml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudEntry {
    /// Authentication parameters (auth_url, username, ...).
    #[serde(default)]
    pub auth: BTreeMap<String, String>,
    /// Region this entry points at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

/// Access to the operator's clouds.yaml, treated as an opaque collaborator.
pub trait CloudsSource {
    /// The raw document bytes, for embedding into credential secrets.
    fn raw(&self) -> Result<Vec<u8>, BoxedError>;

    /// Names of the defined clouds.
    fn cloud_names(&self) -> Result<Vec<String>, BoxedError> {
        let parsed: CloudsYaml = serde_yaml::from_slice(&self.raw()?)?;
        Ok(parsed.clouds.keys().cloned().collect())
    }
}

/// [`CloudsSource`] reading clouds.yaml from disk.
///
/// Looks at the explicit path when given one, otherwise at `./clouds.yaml`
/// and `~/.config/openstack/clouds.yaml` in that order.
#[derive(Debug, Default)]
pub struct FileClouds {
    path: Option<PathBuf>,
}

impl FileClouds {
    /// Read clouds.yaml from an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.path {
            return vec![path.clone()];
        }
        let mut paths = vec![PathBuf::from("clouds.yaml")];
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/openstack/clouds.yaml"));
        }
        paths
    }
}

impl CloudsSource for FileClouds {
    fn raw(&self) -> Result<Vec<u8>, BoxedError> {
        let candidates = self.candidates();
        for path in &candidates {
            match std::fs::read(path) {
                Ok(raw) => return Ok(raw),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Err(format!(
            "no clouds.yaml found (looked at {})",
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
        .into())
    }
}

/// Fixed clouds.yaml content, for tests.
#[derive(Debug, Clone)]
pub struct StaticClouds(pub Vec<u8>);

impl CloudsSource for StaticClouds {
    fn raw(&self) -> Result<Vec<u8>, BoxedError> {
        Ok(self.0.clone())
    }
}
