//! The artifact type produced by assets.

use std::path::{Path, PathBuf};

/// An immutable named byte blob, the unit of persisted output.
///
/// Filenames are relative paths; they identify the artifact both in the state
/// directory used for cache reconstitution and in the final aggregated output
/// written to the installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Relative path of the artifact.
    pub filename: PathBuf,
    /// Raw content.
    pub data: Vec<u8>,
}

impl File {
    /// Create an artifact from a relative path and its content.
    pub fn new(filename: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// The artifact's relative path.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }
}
