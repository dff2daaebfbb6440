//! # Point-in-time read view of the registry.
//!
//! A [`Snapshot`] is an immutable copy-on-write view of the whole mapping,
//! taken in one atomic load. Dependency resolution runs entirely against a
//! snapshot, and `Derived` config functions receive one instead of the live
//! registry, so they never re-enter the atomic read path.
//!
//! ## Rules
//! - A snapshot never changes; concurrent mutations produce new maps and
//!   leave existing snapshots behind.
//! - Reads from a snapshot are infallible lookups plus [`Snapshot::read`],
//!   which reports `NotFound` like the registry's own `read`.

use std::sync::Arc;

use crate::components::{Component, ComponentId, Status};
use crate::error::RegistryError;
use crate::registry::store::RegistryMap;

/// Immutable view of the registry at one instant.
#[derive(Clone)]
pub struct Snapshot {
    map: Arc<RegistryMap>,
}

impl Snapshot {
    pub(crate) fn new(map: Arc<RegistryMap>) -> Self {
        Self { map }
    }

    /// Returns the record for `id`, or `NotFound`.
    ///
    /// This is the snapshot-read form used by `Derived` config functions:
    /// it touches only the already-loaded view, never the live registry.
    pub fn read(&self, id: &str) -> Result<&Component, RegistryError> {
        self.map.get(id).ok_or_else(|| RegistryError::NotFound {
            id: ComponentId::from(id),
        })
    }

    /// Returns the record for `id`, if registered.
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.map.get(id)
    }

    /// True if `id` is registered in this view.
    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Number of registered components in this view.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no components are registered in this view.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All ids, in first-registration order.
    pub fn ids(&self) -> Vec<ComponentId> {
        self.map.keys().cloned().collect()
    }

    /// Ids of started components, in first-registration order.
    pub fn started_ids(&self) -> Vec<ComponentId> {
        self.ids_with_status(Status::Started)
    }

    /// Ids of stopped components, in first-registration order.
    pub fn stopped_ids(&self) -> Vec<ComponentId> {
        self.ids_with_status(Status::Stopped)
    }

    /// Iterates all records, in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.map.values()
    }

    fn ids_with_status(&self, status: Status) -> Vec<ComponentId> {
        self.map
            .values()
            .filter(|c| c.status == status)
            .map(|c| c.id.clone())
            .collect()
    }
}
