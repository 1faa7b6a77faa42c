//! Ordered, collision-checked aggregation of output artifacts.

use crate::error::{Error, Result};
use crate::file::File;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// An ordered list of `(path, content)` pairs with unique paths.
///
/// Composite assets merge their siblings' artifacts through a `FileMap`, and
/// the write phase drains one into the installation directory. Output paths
/// come from fixed naming schemes, so two artifacts claiming the same path is
/// a configuration bug; the map rejects the insert instead of silently
/// overwriting.
#[derive(Debug, Default)]
pub struct FileMap {
    entries: Vec<File>,
    owners: HashMap<PathBuf, String>,
}

impl FileMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one artifact on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathCollision`] naming both owners when the path is
    /// already taken.
    pub fn insert(&mut self, owner: &str, file: File) -> Result<()> {
        if let Some(first) = self.owners.get(&file.filename) {
            return Err(Error::PathCollision {
                path: file.filename.clone(),
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        self.owners
            .insert(file.filename.clone(), owner.to_string());
        self.entries.push(file);
        Ok(())
    }

    /// Add every artifact in `files` on behalf of `owner`.
    pub fn extend(&mut self, owner: &str, files: impl IntoIterator<Item = File>) -> Result<()> {
        for file in files {
            self.insert(owner, file)?;
        }
        Ok(())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &File> {
        self.entries.iter()
    }

    /// Consume the map, yielding the artifacts in insertion order.
    #[must_use]
    pub fn into_files(self) -> Vec<File> {
        self.entries
    }

    /// Whether `path` is already present.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.owners.contains_key(path)
    }

    /// Number of artifacts in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FileMap {
    type Item = File;
    type IntoIter = std::vec::IntoIter<File>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
