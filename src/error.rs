//! Error types used by the subsys registry.
//!
//! This module defines [`RegistryError`], the single error enum returned by
//! every CRUD and lifecycle operation. It provides helper methods
//! (`as_label`, `as_message`) for logging/metrics and predicates such as
//! [`RegistryError::is_conflict`].

use thiserror::Error;

use crate::components::ComponentId;

/// Boxed error returned by user start/stop functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by registry and lifecycle operations.
///
/// CRUD failures are pure: the registry is left byte-for-byte unchanged.
/// Lifecycle failures are positional: components earlier in the closure stay
/// fully transitioned, the failing one and everything after it are untouched.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The operation collided with existing state: a duplicate id on create,
    /// a delete of a started component, or a lifecycle commit whose
    /// precondition no longer held.
    #[error("conflict on component '{id}': {detail}")]
    Conflict {
        /// The component the operation collided on.
        id: ComponentId,
        /// What the collision was.
        detail: String,
    },

    /// The operation referenced an id that is not registered.
    #[error("component '{id}' is not registered")]
    NotFound {
        /// The unregistered id.
        id: ComponentId,
    },

    /// A start closure reached a dependency id that was never registered.
    #[error("dependency '{id}' required by '{required_by}' is not registered")]
    MissingDependency {
        /// The unregistered dependency.
        id: ComponentId,
        /// The component whose `start_deps` named it.
        required_by: ComponentId,
    },

    /// Declared `start_deps` edges form a loop.
    #[error("dependency cycle: {}", render_cycle(.path))]
    DependencyCycle {
        /// The ids along the loop; the first id also closes it.
        path: Vec<ComponentId>,
    },

    /// A user start function returned an error.
    #[error("start function of '{id}' failed: {source}")]
    StartFailed {
        /// The component whose start function failed.
        id: ComponentId,
        /// The underlying error.
        #[source]
        source: BoxError,
    },

    /// A user stop function returned an error.
    #[error("stop function of '{id}' failed: {source}")]
    StopFailed {
        /// The component whose stop function failed.
        id: ComponentId,
        /// The underlying error.
        #[source]
        source: BoxError,
    },
}

fn render_cycle(path: &[ComponentId]) -> String {
    let mut out = String::new();
    for id in path {
        out.push_str(id.as_str());
        out.push_str(" -> ");
    }
    if let Some(first) = path.first() {
        out.push_str(first.as_str());
    }
    out
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use subsys::{ComponentId, RegistryError};
    ///
    /// let err = RegistryError::NotFound { id: ComponentId::from("db") };
    /// assert_eq!(err.as_label(), "not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::Conflict { .. } => "conflict",
            RegistryError::NotFound { .. } => "not_found",
            RegistryError::MissingDependency { .. } => "missing_dependency",
            RegistryError::DependencyCycle { .. } => "dependency_cycle",
            RegistryError::StartFailed { .. } => "start_failed",
            RegistryError::StopFailed { .. } => "stop_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }

    /// Returns the id the error is about, when it names a single component.
    pub fn component(&self) -> Option<&ComponentId> {
        match self {
            RegistryError::Conflict { id, .. }
            | RegistryError::NotFound { id }
            | RegistryError::MissingDependency { id, .. }
            | RegistryError::StartFailed { id, .. }
            | RegistryError::StopFailed { id, .. } => Some(id),
            RegistryError::DependencyCycle { .. } => None,
        }
    }

    /// True for [`RegistryError::Conflict`].
    ///
    /// A conflict during a lifecycle commit means another caller transitioned
    /// the component first; the registry state is still consistent.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RegistryError::Conflict { .. })
    }

    /// True for [`RegistryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }
}
