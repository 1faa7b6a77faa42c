//! Cache reader boundary: fetching previously persisted artifacts.

use crate::error::FetchError;
use crate::file::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads previously persisted artifacts back from the state directory.
///
/// Used only inside [`crate::Asset::load`]. Implementations must report a
/// missing artifact as `Ok(None)` (or an empty match list), never as an
/// error; an error means artifacts exist but could not be read.
pub trait FileFetcher {
    /// Fetch the artifact persisted under exactly `name`.
    fn fetch_exact(&self, name: &Path) -> Result<Option<File>, FetchError>;

    /// Fetch every persisted artifact whose relative path matches `pattern`,
    /// in lexicographic path order.
    fn fetch_by_pattern(&self, pattern: &str) -> Result<Vec<File>, FetchError>;
}

/// [`FileFetcher`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskFetcher {
    root: PathBuf,
}

impl DiskFetcher {
    /// Create a fetcher rooted at the given state directory.
    ///
    /// The directory does not have to exist; a missing root simply yields no
    /// artifacts.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileFetcher for DiskFetcher {
    fn fetch_exact(&self, name: &Path) -> Result<Option<File>, FetchError> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(data) => {
                debug!("fetched '{}' from state directory", name.display());
                Ok(Some(File::new(name, data)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FetchError::Io { path, source }),
        }
    }

    fn fetch_by_pattern(&self, pattern: &str) -> Result<Vec<File>, FetchError> {
        let full = self.root.join(pattern);
        let paths = glob::glob(&full.to_string_lossy()).map_err(|source| FetchError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|err| FetchError::Io {
                path: err.path().to_path_buf(),
                source: err.into_error(),
            })?;
            if !path.is_file() {
                continue;
            }
            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_path_buf();
            let data = std::fs::read(&path).map_err(|source| FetchError::Io { path, source })?;
            matches.push(File::new(relative, data));
        }
        matches.sort_by(|a, b| a.filename.cmp(&b.filename));
        debug!("pattern '{}' matched {} artifact(s)", pattern, matches.len());
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("manifests")).unwrap();
        std::fs::write(dir.path().join("install-config.yaml"), b"metadata: {}").unwrap();
        std::fs::write(dir.path().join("manifests/00_config.yaml"), b"a").unwrap();
        std::fs::write(dir.path().join("manifests/99_role.yaml"), b"b").unwrap();
        dir
    }

    #[test]
    fn exact_fetch_hits_and_misses() {
        let dir = state_dir();
        let fetcher = DiskFetcher::new(dir.path());

        let file = fetcher
            .fetch_exact(Path::new("install-config.yaml"))
            .unwrap()
            .expect("file exists");
        assert_eq!(file.filename, PathBuf::from("install-config.yaml"));
        assert_eq!(file.data, b"metadata: {}");

        assert!(
            fetcher
                .fetch_exact(Path::new("no-such-file.yaml"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn pattern_fetch_returns_sorted_relative_paths() {
        let dir = state_dir();
        let fetcher = DiskFetcher::new(dir.path());

        let files = fetcher.fetch_by_pattern("manifests/*").unwrap();
        let names: Vec<_> = files.iter().map(|f| f.filename.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("manifests/00_config.yaml"),
                PathBuf::from("manifests/99_role.yaml"),
            ]
        );
    }

    #[test]
    fn unreadable_artifact_is_an_error_not_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where a file is expected fails the read outright.
        std::fs::create_dir(dir.path().join("install-config.yaml")).unwrap();
        let fetcher = DiskFetcher::new(dir.path());

        let err = fetcher
            .fetch_exact(Path::new("install-config.yaml"))
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn pattern_fetch_on_missing_directory_is_a_clean_miss() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = DiskFetcher::new(dir.path().join("never-created"));
        assert!(fetcher.fetch_by_pattern("manifests/*").unwrap().is_empty());
    }
}
