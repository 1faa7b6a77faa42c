//! Error types for asset resolution.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type carried by individual asset `load`/`generate`
/// implementations before the store attributes them to an asset.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for asset store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the asset store and the artifact merge layer.
///
/// Every error aborts the whole resolution; there is no partial-success mode
/// and no retry inside the engine.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The dependency graph contains a cycle.
    #[error("dependency cycle detected: {path}")]
    #[diagnostic(code(clusterforge_asset::graph::cycle))]
    Cycle {
        /// The offending path, rendered as `A -> B -> A`.
        path: String,
    },

    /// Previously persisted artifacts exist for an asset but are malformed.
    #[error("asset '{asset}' failed to load from the state cache")]
    #[diagnostic(code(clusterforge_asset::load))]
    Load {
        /// Name of the asset whose cached state could not be read back.
        asset: &'static str,
        /// The underlying cause reported by the asset.
        #[source]
        source: BoxedError,
    },

    /// An asset's `generate` failed.
    #[error("asset '{asset}' failed to generate")]
    #[diagnostic(code(clusterforge_asset::generate))]
    Generate {
        /// Name of the failing asset.
        asset: &'static str,
        /// The underlying cause reported by the asset.
        #[source]
        source: BoxedError,
    },

    /// An asset asked its parent set for a dependency it never declared,
    /// or the store was queried for an identity it has not resolved.
    #[error("no resolved instance of '{parent}' is available")]
    #[diagnostic(code(clusterforge_asset::parents::missing))]
    MissingParent {
        /// Type name of the requested asset.
        parent: &'static str,
    },

    /// Two artifacts entering one merged output set claim the same path.
    #[error("output path '{}' produced by both '{first}' and '{second}'", path.display())]
    #[diagnostic(code(clusterforge_asset::merge::collision))]
    PathCollision {
        /// The contested relative output path.
        path: PathBuf,
        /// Owner that inserted the path first.
        first: String,
        /// Owner that tried to insert it again.
        second: String,
    },
}

impl Error {
    /// Build a [`Error::Cycle`] from the sequence of asset names on the path.
    #[must_use]
    pub fn cycle(path: &[&'static str]) -> Self {
        Self::Cycle {
            path: path.join(" -> "),
        }
    }

    /// Build a [`Error::MissingParent`] for the given asset type name.
    #[must_use]
    pub fn missing_parent(parent: &'static str) -> Self {
        Self::MissingParent { parent }
    }
}

/// Errors surfaced by a [`crate::FileFetcher`].
///
/// "Not found" is never an error; fetchers report it as `None` / an empty
/// match list so assets can distinguish a clean cache miss from corruption.
#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    /// Reading a cached artifact failed for a reason other than absence.
    #[error("failed to read '{}' from the state directory", path.display())]
    #[diagnostic(code(clusterforge_asset::fetch::io))]
    Io {
        /// Path of the artifact that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The supplied glob pattern does not parse.
    #[error("invalid fetch pattern '{pattern}'")]
    #[diagnostic(code(clusterforge_asset::fetch::pattern))]
    Pattern {
        /// The rejected pattern.
        pattern: String,
        /// The underlying pattern error.
        #[source]
        source: glob::PatternError,
    },
}
