//! # Dependency resolution.
//!
//! Pure order computation over a [`Snapshot`]: given one or more target ids
//! and a direction, produce the sequence the engine must process.
//!
//! ## Rules
//! - **Start order**: depth-first over `start_deps` in declared order;
//!   dependencies come strictly before their dependents; components already
//!   started in the snapshot are skipped.
//! - **Stop order**: depth-first over the derived reverse edges (started
//!   components whose `start_deps` name the visited id, in first-registration
//!   order); dependents come strictly before the dependency they rely on.
//! - An id collected once is never reinserted, so overlapping closures of
//!   multiple roots deduplicate.
//! - The walk tracks its active path; revisiting an on-path id fails with
//!   `DependencyCycle` carrying the loop.

use std::collections::HashSet;

use crate::components::{Component, ComponentId};
use crate::error::RegistryError;
use crate::registry::Snapshot;

/// Start order for a single target.
pub(crate) fn start_order(
    snap: &Snapshot,
    target: &ComponentId,
) -> Result<Vec<ComponentId>, RegistryError> {
    start_order_roots(snap, std::slice::from_ref(target))
}

/// Start order for the given roots, deduplicated across their closures.
///
/// A root that is not registered fails `NotFound`; an unregistered id
/// reached through an edge fails `MissingDependency`.
pub(crate) fn start_order_roots(
    snap: &Snapshot,
    roots: &[ComponentId],
) -> Result<Vec<ComponentId>, RegistryError> {
    let mut walk = Walk::new(snap);
    for root in roots {
        let comp = snap.get(root.as_str()).ok_or_else(|| RegistryError::NotFound {
            id: root.clone(),
        })?;
        walk.visit_start(comp)?;
    }
    Ok(walk.collected)
}

/// Start order for every registered component, in first-registration order.
pub(crate) fn start_order_all(snap: &Snapshot) -> Result<Vec<ComponentId>, RegistryError> {
    let mut walk = Walk::new(snap);
    for comp in snap.iter() {
        walk.visit_start(comp)?;
    }
    Ok(walk.collected)
}

/// Stop order for a single target.
pub(crate) fn stop_order(
    snap: &Snapshot,
    target: &ComponentId,
) -> Result<Vec<ComponentId>, RegistryError> {
    stop_order_roots(snap, std::slice::from_ref(target))
}

/// Stop order for the given roots, deduplicated across their closures.
pub(crate) fn stop_order_roots(
    snap: &Snapshot,
    roots: &[ComponentId],
) -> Result<Vec<ComponentId>, RegistryError> {
    let mut walk = Walk::new(snap);
    for root in roots {
        let comp = snap.get(root.as_str()).ok_or_else(|| RegistryError::NotFound {
            id: root.clone(),
        })?;
        walk.visit_stop(comp)?;
    }
    Ok(walk.collected)
}

/// Stop order for every registered component, in reverse first-registration
/// order.
pub(crate) fn stop_order_all(snap: &Snapshot) -> Result<Vec<ComponentId>, RegistryError> {
    let mut walk = Walk::new(snap);
    let ids = snap.ids();
    for id in ids.iter().rev() {
        if let Some(comp) = snap.get(id.as_str()) {
            walk.visit_stop(comp)?;
        }
    }
    Ok(walk.collected)
}

/// Depth-first traversal state shared by both directions.
struct Walk<'s> {
    snap: &'s Snapshot,
    collected: Vec<ComponentId>,
    seen: HashSet<ComponentId>,
    on_path: Vec<ComponentId>,
}

impl<'s> Walk<'s> {
    fn new(snap: &'s Snapshot) -> Self {
        Self {
            snap,
            collected: Vec::new(),
            seen: HashSet::new(),
            on_path: Vec::new(),
        }
    }

    /// Collects `comp`'s not-yet-started dependencies, then `comp` itself.
    fn visit_start(&mut self, comp: &Component) -> Result<(), RegistryError> {
        if comp.is_started() || self.seen.contains(&comp.id) {
            return Ok(());
        }
        self.on_path.push(comp.id.clone());
        for dep in &comp.start_deps {
            if self.seen.contains(dep) {
                continue;
            }
            if let Some(pos) = self.on_path.iter().position(|p| p == dep) {
                return Err(RegistryError::DependencyCycle {
                    path: self.on_path[pos..].to_vec(),
                });
            }
            let dep_comp =
                self.snap
                    .get(dep.as_str())
                    .ok_or_else(|| RegistryError::MissingDependency {
                        id: dep.clone(),
                        required_by: comp.id.clone(),
                    })?;
            self.visit_start(dep_comp)?;
        }
        self.on_path.pop();
        self.seen.insert(comp.id.clone());
        self.collected.push(comp.id.clone());
        Ok(())
    }

    /// Collects `comp`'s started dependents, then `comp` itself.
    fn visit_stop(&mut self, comp: &Component) -> Result<(), RegistryError> {
        if !comp.is_started() || self.seen.contains(&comp.id) {
            return Ok(());
        }
        self.on_path.push(comp.id.clone());
        // Reverse edges are derived fresh from the snapshot, never persisted.
        let dependents: Vec<ComponentId> = self
            .snap
            .iter()
            .filter(|c| c.is_started() && c.start_deps.contains(&comp.id))
            .map(|c| c.id.clone())
            .collect();
        for dependent in dependents {
            if self.seen.contains(&dependent) {
                continue;
            }
            if let Some(pos) = self.on_path.iter().position(|p| p == &dependent) {
                return Err(RegistryError::DependencyCycle {
                    path: self.on_path[pos..].to_vec(),
                });
            }
            if let Some(dep_comp) = self.snap.get(dependent.as_str()) {
                self.visit_stop(dep_comp)?;
            }
        }
        self.on_path.pop();
        self.seen.insert(comp.id.clone());
        self.collected.push(comp.id.clone());
        Ok(())
    }
}
