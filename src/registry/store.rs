//! # Atomic storage for the component mapping.
//!
//! [`Store`] owns the `id -> component` map behind an RCU cell: readers load
//! a cheap immutable snapshot, writers build a replacement map and install
//! it with compare-and-swap, retrying on contention.
//!
//! ## Rules
//! - No raw mutable reference to the map ever leaves this module; every
//!   mutation goes through [`Store::transform`].
//! - A transform closure must be a pure function of the map it is given: it
//!   may run several times when writers collide.
//! - A transform that returns an error installs nothing; the map is
//!   byte-for-byte unchanged.
//! - Insertion order of first registration is the map's iteration order
//!   (`IndexMap`); deletion uses `shift_remove` to keep it.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;

use crate::components::{Component, ComponentId};
use crate::error::RegistryError;

/// Insertion-ordered component mapping.
pub(crate) type RegistryMap = IndexMap<ComponentId, Component>;

/// RCU cell holding the registry map.
pub(crate) struct Store {
    map: ArcSwap<RegistryMap>,
}

impl Store {
    /// Creates an empty store.
    pub(crate) fn new() -> Self {
        Self {
            map: ArcSwap::from_pointee(RegistryMap::new()),
        }
    }

    /// Loads the current map as a shared snapshot.
    pub(crate) fn load(&self) -> Arc<RegistryMap> {
        self.map.load_full()
    }

    /// Applies one atomic read-compute-swap transform.
    ///
    /// The closure receives the current map and returns either the
    /// replacement map plus an output value, or an error. On a CAS collision
    /// the closure is re-run against the winner's map.
    pub(crate) fn transform<T>(
        &self,
        mut f: impl FnMut(&RegistryMap) -> Result<(RegistryMap, T), RegistryError>,
    ) -> Result<T, RegistryError> {
        let mut cur = self.map.load();
        loop {
            let (next, out) = f(&cur)?;
            let prev = self.map.compare_and_swap(&*cur, Arc::new(next));
            if Arc::ptr_eq(&prev, &cur) {
                return Ok(out);
            }
            cur = prev;
        }
    }
}
