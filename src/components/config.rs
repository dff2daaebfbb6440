//! # Component configuration values.
//!
//! [`ConfigValue`] is the tagged variant behind every component's `config`
//! field: either a fixed value, or a function of the whole registry snapshot
//! evaluated at start time (late-bound configuration, e.g. "the web port
//! comes from whatever the config-loader component produced").
//!
//! ## Rules
//! - `Derived` functions must be pure reads of the snapshot: they run on the
//!   caller's thread, inside the start sequence, and must not call back into
//!   the registry (use [`Snapshot::read`](crate::Snapshot::read), never
//!   [`Registry::read`](crate::Registry::read)).
//! - Resolution happens at start time, not at create time: re-registering or
//!   restarting a dependency changes what a dependent's `Derived` config sees.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::registry::Snapshot;

/// Shared opaque value: resolved configs and state handles.
pub type SharedValue = Arc<dyn Any + Send + Sync>;

/// Function deriving a config value from a registry snapshot.
pub type DeriveFn = Arc<dyn Fn(&Snapshot) -> SharedValue + Send + Sync>;

/// Declared configuration of a component.
#[derive(Clone)]
pub enum ConfigValue {
    /// A fixed value, used as-is.
    Static(SharedValue),
    /// A pure function of the current registry snapshot, invoked at start time.
    Derived(DeriveFn),
}

impl ConfigValue {
    /// Wraps a plain value as a static config.
    ///
    /// # Example
    /// ```
    /// use subsys::ConfigValue;
    ///
    /// let cfg = ConfigValue::value(8080u16);
    /// ```
    pub fn value<T: Any + Send + Sync>(v: T) -> Self {
        ConfigValue::Static(Arc::new(v))
    }

    /// Wraps a snapshot function as a derived config.
    ///
    /// The function receives the live snapshot taken just before the
    /// component's start function runs.
    pub fn derived<F, T>(f: F) -> Self
    where
        F: Fn(&Snapshot) -> T + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        ConfigValue::Derived(Arc::new(move |snap| Arc::new(f(snap)) as SharedValue))
    }

    /// Resolves the config against a snapshot.
    pub(crate) fn resolve(&self, snap: &Snapshot) -> SharedValue {
        match self {
            ConfigValue::Static(v) => Arc::clone(v),
            ConfigValue::Derived(f) => f(snap),
        }
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Static(_) => f.write_str("ConfigValue::Static(..)"),
            ConfigValue::Derived(_) => f.write_str("ConfigValue::Derived(..)"),
        }
    }
}
