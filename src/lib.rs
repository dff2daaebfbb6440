//! # subsys
//!
//! **Subsys** is an in-process component-lifecycle registry for Rust.
//!
//! It keeps one inspectable place describing "what is configured" and "what
//! is currently running" for every subsystem of an application, and brings
//! those subsystems up and down in dependency-correct order. Components are
//! plain records plus optional start/stop closures; no structural pattern is
//! imposed on them.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//!  │ ComponentSpec │   │ ComponentSpec │   │ ComponentSpec │
//!  │  (id, config) │   │ (+start_deps) │   │ (+lifecycle)  │
//!  └──────┬────────┘   └──────┬────────┘   └──────┬────────┘
//!         ▼                   ▼                   ▼
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Registry (single source of truth)                             │
//! │  - Store (RCU map: id -> Component, first-registration order)  │
//! │  - CRUD: one atomic transform per call                         │
//! │  - SubscriberSet (commit-order event fan-out)                  │
//! └──────┬────────────────────────────────────────┬────────────────┘
//!        │ snapshot()                             │ emit(Event)
//!        ▼                                        ▼
//! ┌─────────────────────────────┐       ┌──────────────────────┐
//! │  Lifecycle engine           │       │  Subscribers         │
//! │  resolve: DFS start/stop    │       │  LogWriter, metrics, │
//! │  order over the snapshot    │       │  custom Subscribe    │
//! │  execute: start_fn/stop_fn  │       └──────────────────────┘
//! │  commit: CAS per component  │
//! └─────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! start("web"):
//!   ├─► snapshot; already started? ─► Ok (no-op)
//!   ├─► resolve start order (deps first, cycle & missing-dep checks)
//!   └─► for each id in order:
//!         ├─► re-check live registry (skip if started / non-executable)
//!         ├─► resolve config (Static | Derived(snapshot))
//!         ├─► start_fn(config) ─► state handle
//!         │       └─ Err ─► StartFailed, abort remaining closure
//!         └─► commit Started+handle iff still Stopped
//!                 └─ raced ─► Conflict, abort remaining closure
//!
//! stop("db") mirrors it over the derived reverse edges:
//! started dependents stop strictly before the dependency they rely on.
//! ```
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                        |
//! |-------------------|----------------------------------------------------------------------|-------------------------------------------|
//! | **Registry**      | Atomic CRUD over the component mapping, ordered enumeration.         | [`Registry`], [`Snapshot`]                |
//! | **Components**    | Records with static or snapshot-derived config and start/stop pairs. | [`ComponentSpec`], [`ConfigValue`], [`Lifecycle`] |
//! | **Lifecycle**     | Dependency-ordered start/stop with positional failure semantics.     | [`Registry::start`], [`Registry::stop`]   |
//! | **Observability** | Commit-order events fanned out to subscribers.                       | [`Subscribe`], [`Event`], [`LogWriter`]   |
//! | **Errors**        | Typed errors with stable labels for logs/metrics.                    | [`RegistryError`]                         |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use subsys::{ComponentSpec, ConfigValue, Registry, SharedValue, StateHandle};
//!
//! fn main() -> Result<(), subsys::RegistryError> {
//!     let registry = Registry::from_specs([
//!         ComponentSpec::new("db", ConfigValue::value("postgres://localhost"))
//!             .with_lifecycle(
//!                 |_cfg: SharedValue| Ok(Arc::new("pool") as StateHandle),
//!                 |_h: StateHandle| Ok(()),
//!             ),
//!         ComponentSpec::new("web", ConfigValue::value(8080u16))
//!             .with_start_deps(["db"])
//!             .with_lifecycle(
//!                 |_cfg: SharedValue| Ok(Arc::new("server") as StateHandle),
//!                 |_h: StateHandle| Ok(()),
//!             ),
//!     ])?;
//!
//!     // Starting web pulls db in first.
//!     registry.start("web")?;
//!     let started: Vec<_> = registry.started_ids();
//!     assert_eq!(started.len(), 2);
//!
//!     // Stopping db stops web first (derived reverse edge).
//!     registry.stop("db")?;
//!     assert!(registry.started_ids().is_empty());
//!     Ok(())
//! }
//! ```

mod components;
mod error;
mod events;
mod lifecycle;
mod registry;
mod subscribers;

// ---- Public re-exports ----

pub use components::{
    Component, ComponentId, ComponentSpec, ConfigValue, DeriveFn, Lifecycle, SharedValue, StartFn,
    StateHandle, Status, StopFn,
};
pub use error::{BoxError, RegistryError};
pub use events::{Event, EventKind};
pub use registry::{DEFAULT_NAMESPACE, Registry, RegistryBuilder, Snapshot};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
