//! Dependency-graph resolution engine for clusterforge configuration assets.
//!
//! An asset is a named unit of configuration state that declares the assets
//! it depends on, can reconstitute itself from previously persisted artifacts
//! (`load`), compute itself from its resolved dependencies (`generate`), and
//! expose zero or more output artifacts (`files`).
//!
//! The [`Store`] drives resolution: it walks the declared dependency graph,
//! rejects cycles, resolves dependencies before dependents, memoizes one
//! instance per asset type for the lifetime of the run, and prefers cache
//! reconstitution over regeneration. Side effects inside `generate` (prompts,
//! cloud lookups) therefore happen at most once per asset per run, no matter
//! how many dependents share the asset.
//!
//! # Example
//!
//! ```ignore
//! use clusterforge_asset::{Asset, DiskFetcher, Parents, Store};
//!
//! #[derive(Default)]
//! struct Region { value: String }
//!
//! impl Asset<Collaborators> for Region {
//!     fn name(&self) -> &'static str { "Region" }
//!
//!     fn generate(&mut self, ctx: &Collaborators, _parents: &Parents<Collaborators>)
//!         -> Result<(), BoxedError>
//!     {
//!         self.value = ctx.answers.resolve(&REGION_QUESTION)?;
//!         Ok(())
//!     }
//! }
//!
//! let mut store = Store::new(Box::new(DiskFetcher::new(".")));
//! let region = store.resolve::<Region>(&collaborators)?;
//! ```

mod error;
mod fetcher;
mod file;
mod filemap;
mod parents;
mod store;

pub use error::{BoxedError, Error, FetchError, Result};
pub use fetcher::{DiskFetcher, FileFetcher};
pub use file::File;
pub use filemap::FileMap;
pub use parents::Parents;
pub use store::Store;

use std::any::Any;

/// A named, dependency-aware unit of configuration state.
///
/// `C` is the collaborator context shared across one run (answer sources,
/// cloud lookups); the engine passes it through to `generate` untouched.
/// The concrete asset type is the memoization identity: every dependency
/// edge pointing at the same type resolves to one shared instance per run.
pub trait Asset<C>: Any {
    /// Human-friendly name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Fresh, unresolved instances of the assets this one needs resolved
    /// before it can generate. The list is fixed per asset type; it must not
    /// depend on this asset's own resolution.
    fn dependencies(&self) -> Vec<Box<dyn Asset<C>>> {
        Vec::new()
    }

    /// Attempt to reconstitute state from previously persisted artifacts.
    ///
    /// `Ok(false)` means nothing was persisted, a legitimate cache miss.
    /// An error means artifacts exist but are malformed; the store aborts
    /// rather than regenerating over corrupt state. Assets with no persisted
    /// form keep the default.
    fn load(&mut self, _fetcher: &dyn FileFetcher) -> std::result::Result<bool, BoxedError> {
        Ok(false)
    }

    /// Compute state from the resolved dependency snapshot and the
    /// collaborators in `ctx`. Must be deterministic given identical parent
    /// state and collaborator answers.
    fn generate(&mut self, ctx: &C, parents: &Parents<C>)
        -> std::result::Result<(), BoxedError>;

    /// The asset's persisted contribution; empty for pure computation nodes
    /// that only pass derived values to dependents.
    fn files(&self) -> Vec<File> {
        Vec::new()
    }
}
