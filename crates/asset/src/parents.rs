//! The read-only dependency snapshot handed to `generate`.

use crate::error::{Error, Result};
use crate::Asset;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only collection of already-resolved dependency instances.
///
/// The store builds one snapshot per asset from that asset's declared
/// dependencies; every lookup returns the single memoized instance shared by
/// all dependents in the run.
pub struct Parents<C> {
    assets: HashMap<TypeId, Arc<dyn Asset<C>>>,
}

impl<C: 'static> Parents<C> {
    /// Create an empty parent set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Add a resolved instance to the snapshot.
    pub(crate) fn insert(&mut self, asset: Arc<dyn Asset<C>>) {
        let any: &dyn Any = &*asset;
        self.assets.insert(any.type_id(), asset);
    }

    /// Look up the resolved instance of asset type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParent`] when `T` was not declared as a
    /// dependency of the asset holding this snapshot. That is a programming
    /// error in the dependent's `dependencies`, not a runtime condition.
    pub fn get<T: Asset<C>>(&self) -> Result<&T> {
        self.assets
            .get(&TypeId::of::<T>())
            .and_then(|asset| {
                let any: &dyn Any = &**asset;
                any.downcast_ref::<T>()
            })
            .ok_or_else(|| Error::missing_parent(std::any::type_name::<T>()))
    }

    /// Whether an instance of asset type `T` is present.
    #[must_use]
    pub fn contains<T: Asset<C>>(&self) -> bool {
        self.assets.contains_key(&TypeId::of::<T>())
    }

    /// Number of resolved parents in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl<C: 'static> Default for Parents<C> {
    fn default() -> Self {
        Self::new()
    }
}
