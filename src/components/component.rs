//! # Component record and status.
//!
//! A [`Component`] is the unit of management: its declared configuration,
//! its dependency edges, its optional start/stop behavior, and the live
//! resource handle left behind by the last successful start.
//!
//! ## Rules
//! - `id` is immutable after creation.
//! - `status` and `state` are lifecycle-owned: CRUD updates never touch them.
//! - `state` is `Some` only while `status` is [`Status::Started`], and only
//!   for executable components (those carrying a [`Lifecycle`]).

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::components::{ConfigValue, Lifecycle, StateHandle};

/// Opaque unique component identifier.
///
/// Cheaply cloneable (interned string); compares and hashes by content.
///
/// # Example
/// ```
/// use subsys::ComponentId;
///
/// let id = ComponentId::from("db");
/// assert_eq!(id.as_str(), "db");
/// assert_eq!(id, id.clone());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(Arc<str>);

impl ComponentId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&ComponentId> for ComponentId {
    fn from(id: &ComponentId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.0)
    }
}

/// Lifecycle status of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Not running; `state` is empty.
    Stopped,
    /// Running; `state` holds the handle from the last successful start.
    Started,
}

impl Status {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Status::Stopped => "stopped",
            Status::Started => "started",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One managed component: configuration, edges, behavior, live state.
///
/// Records are owned by the registry map; [`Registry::read`](crate::Registry::read)
/// hands out clones (all heavy fields are shared via `Arc`).
#[derive(Clone)]
pub struct Component {
    /// Unique identifier, immutable after creation.
    pub id: ComponentId,
    /// Declared configuration: a static value or a snapshot-derived one.
    pub config: ConfigValue,
    /// Start/stop pair; `None` marks the component non-executable.
    pub lifecycle: Option<Lifecycle>,
    /// Handle returned by the last successful start; `None` when stopped.
    pub state: Option<StateHandle>,
    /// Current lifecycle status.
    pub status: Status,
    /// Ids that must be started before this component starts, in declared order.
    pub start_deps: Vec<ComponentId>,
}

impl Component {
    /// True when the component carries a start/stop pair.
    pub fn is_executable(&self) -> bool {
        self.lifecycle.is_some()
    }

    /// True when `status` is [`Status::Started`].
    pub fn is_started(&self) -> bool {
        self.status == Status::Started
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("executable", &self.is_executable())
            .field("has_state", &self.state.is_some())
            .field("start_deps", &self.start_deps)
            .finish()
    }
}
