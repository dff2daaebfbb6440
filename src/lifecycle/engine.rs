//! # Lifecycle execution.
//!
//! Walks a resolved order, runs the user start/stop functions, and commits
//! each transition with a conditional atomic swap.
//!
//! ## Per-step protocol (start direction)
//! ```text
//! for id in order {
//!   ├─► load live snapshot (not the resolution snapshot)
//!   ├─► skip if already started / non-executable
//!   ├─► resolve config (Static as-is, Derived against the live snapshot)
//!   ├─► emit Starting, invoke start_fn(config) ─► handle
//!   │       └─ Err ──► emit StartFailed, abort remaining closure
//!   └─► commit: status=Started, state=handle, iff still registered & Stopped
//!           └─ precondition gone ──► Conflict, abort remaining closure
//! }
//! ```
//!
//! ## Rules
//! - Side effects run exactly once per step and are never retried or rolled
//!   back; only the bookkeeping commit is validated atomically.
//! - A commit lost to a concurrent caller drops the freshly created handle;
//!   the start function owns cleanup of uncommitted resources.
//! - Earlier steps of an aborted closure stay fully transitioned.

use tracing::{debug, error, warn};

use crate::components::{ComponentId, StateHandle, Status};
use crate::error::RegistryError;
use crate::events::{Event, EventKind};
use crate::registry::Registry;

/// Runs the start direction over a resolved order.
///
/// Returns the ids actually transitioned by this call, in execution order.
pub(crate) fn run_start(
    registry: &Registry,
    order: &[ComponentId],
) -> Result<Vec<ComponentId>, RegistryError> {
    let mut transitioned = Vec::new();
    for id in order {
        let snap = registry.snapshot();
        let comp = match snap.get(id.as_str()) {
            Some(c) => c,
            None => {
                return Err(RegistryError::Conflict {
                    id: id.clone(),
                    detail: "deleted concurrently during start".into(),
                });
            }
        };
        if comp.is_started() {
            debug!(component = id.as_str(), "already started, skipping");
            continue;
        }
        let Some(lifecycle) = comp.lifecycle.clone() else {
            debug!(component = id.as_str(), "non-executable, skipping");
            continue;
        };
        let config = comp.config.resolve(&snap);

        registry.emit(Event::new(EventKind::Starting).with_component(id.as_str()));
        let handle = match lifecycle.start(config) {
            Ok(h) => h,
            Err(source) => {
                error!(component = id.as_str(), error = %source, "start function failed");
                registry.emit(
                    Event::new(EventKind::StartFailed)
                        .with_component(id.as_str())
                        .with_reason(source.to_string()),
                );
                return Err(RegistryError::StartFailed {
                    id: id.clone(),
                    source,
                });
            }
        };

        commit_started(registry, id, handle)?;
        registry.emit(Event::new(EventKind::Started).with_component(id.as_str()));
        debug!(component = id.as_str(), "started");
        transitioned.push(id.clone());
    }
    Ok(transitioned)
}

/// Runs the stop direction over a resolved order.
///
/// Returns the ids actually transitioned by this call, in execution order.
pub(crate) fn run_stop(
    registry: &Registry,
    order: &[ComponentId],
) -> Result<Vec<ComponentId>, RegistryError> {
    let mut transitioned = Vec::new();
    for id in order {
        let snap = registry.snapshot();
        let comp = match snap.get(id.as_str()) {
            Some(c) => c,
            None => {
                return Err(RegistryError::Conflict {
                    id: id.clone(),
                    detail: "deleted concurrently during stop".into(),
                });
            }
        };
        if !comp.is_started() {
            debug!(component = id.as_str(), "already stopped, skipping");
            continue;
        }
        let Some(lifecycle) = comp.lifecycle.clone() else {
            debug!(component = id.as_str(), "non-executable, skipping");
            continue;
        };

        registry.emit(Event::new(EventKind::Stopping).with_component(id.as_str()));
        if let Some(handle) = comp.state.clone() {
            if let Err(source) = lifecycle.stop(handle) {
                error!(component = id.as_str(), error = %source, "stop function failed");
                registry.emit(
                    Event::new(EventKind::StopFailed)
                        .with_component(id.as_str())
                        .with_reason(source.to_string()),
                );
                return Err(RegistryError::StopFailed {
                    id: id.clone(),
                    source,
                });
            }
        }

        commit_stopped(registry, id)?;
        registry.emit(Event::new(EventKind::Stopped).with_component(id.as_str()));
        debug!(component = id.as_str(), "stopped");
        transitioned.push(id.clone());
    }
    Ok(transitioned)
}

/// Commits `Started` + the new handle, iff the record still exists and is
/// still `Stopped`.
fn commit_started(
    registry: &Registry,
    id: &ComponentId,
    handle: StateHandle,
) -> Result<(), RegistryError> {
    let res = registry.store().transform(|map| {
        let comp = map.get(id.as_str()).ok_or_else(|| RegistryError::Conflict {
            id: id.clone(),
            detail: "deleted concurrently before commit".into(),
        })?;
        if comp.status != Status::Stopped {
            return Err(RegistryError::Conflict {
                id: id.clone(),
                detail: "started concurrently by another caller".into(),
            });
        }
        let mut updated = comp.clone();
        updated.status = Status::Started;
        updated.state = Some(handle.clone());
        let mut next = map.clone();
        next.insert(id.clone(), updated);
        Ok((next, ()))
    });
    if let Err(err) = &res {
        // The side effect already ran; its handle is dropped here.
        warn!(component = id.as_str(), error = %err, "start commit lost");
    }
    res
}

/// Commits `Stopped` + cleared state, iff the record still exists and is
/// still `Started`.
fn commit_stopped(registry: &Registry, id: &ComponentId) -> Result<(), RegistryError> {
    let res = registry.store().transform(|map| {
        let comp = map.get(id.as_str()).ok_or_else(|| RegistryError::Conflict {
            id: id.clone(),
            detail: "deleted concurrently before commit".into(),
        })?;
        if comp.status != Status::Started {
            return Err(RegistryError::Conflict {
                id: id.clone(),
                detail: "stopped concurrently by another caller".into(),
            });
        }
        let mut updated = comp.clone();
        updated.status = Status::Stopped;
        updated.state = None;
        let mut next = map.clone();
        next.insert(id.clone(), updated);
        Ok((next, ()))
    });
    if let Err(err) = &res {
        warn!(component = id.as_str(), error = %err, "stop commit lost");
    }
    res
}
