//! # Component specification.
//!
//! Defines [`ComponentSpec`], the input bundle for
//! [`Registry::create`](crate::Registry::create) and the declarative build
//! path ([`Registry::from_specs`](crate::Registry::from_specs)).
//!
//! A spec carries the two mandatory fields (`id`, `config`) plus the
//! optionals, attached with `with_*` modifiers:
//! - `with_start_deps`: ids that must be started first (default: none);
//! - `with_lifecycle`: the start/stop pair (default: non-executable).
//!
//! ## Rules
//! - `start_deps` may name ids not yet registered; the dependency is
//!   required at start time, not at create time.
//! - Status and state are not part of a spec: new records start as
//!   `Stopped` with no state, and `update` never touches either.

use crate::components::{
    Component, ComponentId, ConfigValue, Lifecycle, SharedValue, StateHandle, Status,
};
use crate::error::BoxError;

/// Declared shape of a component, before registration.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use subsys::{ComponentSpec, ConfigValue, SharedValue, StateHandle};
///
/// let spec = ComponentSpec::new("cache", ConfigValue::value(1024usize))
///     .with_start_deps(["db"])
///     .with_lifecycle(
///         |_cfg: SharedValue| Ok(Arc::new(()) as StateHandle),
///         |_h: StateHandle| Ok(()),
///     );
/// assert_eq!(spec.id().as_str(), "cache");
/// assert!(spec.is_executable());
/// ```
#[derive(Clone)]
pub struct ComponentSpec {
    id: ComponentId,
    config: ConfigValue,
    start_deps: Vec<ComponentId>,
    lifecycle: Option<Lifecycle>,
}

impl ComponentSpec {
    /// Creates a spec with the two mandatory fields.
    pub fn new(id: impl Into<ComponentId>, config: ConfigValue) -> Self {
        Self {
            id: id.into(),
            config,
            start_deps: Vec::new(),
            lifecycle: None,
        }
    }

    /// Returns a new spec with the given start dependencies, in order.
    pub fn with_start_deps<I, T>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ComponentId>,
    {
        self.start_deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Returns a new spec with the given start/stop pair attached.
    ///
    /// Attaching both functions at once is what enforces the rule that they
    /// are present together or not at all.
    pub fn with_lifecycle<S, T>(mut self, start: S, stop: T) -> Self
    where
        S: Fn(SharedValue) -> Result<StateHandle, BoxError> + Send + Sync + 'static,
        T: Fn(StateHandle) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.lifecycle = Some(Lifecycle::new(start, stop));
        self
    }

    /// Returns the component id.
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Returns the declared config.
    pub fn config(&self) -> &ConfigValue {
        &self.config
    }

    /// Returns the declared start dependencies.
    pub fn start_deps(&self) -> &[ComponentId] {
        &self.start_deps
    }

    /// True when a start/stop pair is attached.
    pub fn is_executable(&self) -> bool {
        self.lifecycle.is_some()
    }

    /// Normalizes the spec into a fresh stopped record.
    pub(crate) fn into_component(self) -> Component {
        Component {
            id: self.id,
            config: self.config,
            lifecycle: self.lifecycle,
            state: None,
            status: Status::Stopped,
            start_deps: self.start_deps,
        }
    }

    /// Applies the spec onto an existing record, keeping the
    /// lifecycle-owned fields (`status`, `state`) of the original.
    pub(crate) fn apply_to(self, existing: &Component) -> Component {
        Component {
            id: self.id,
            config: self.config,
            lifecycle: self.lifecycle,
            state: existing.state.clone(),
            status: existing.status,
            start_deps: self.start_deps,
        }
    }
}
