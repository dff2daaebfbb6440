//! # Registry builder.
//!
//! Configures the pieces that must be fixed before any component exists:
//! the subscriber set and the namespace label.

use std::borrow::Cow;
use std::sync::Arc;

use crate::components::ComponentSpec;
use crate::error::RegistryError;
use crate::registry::Registry;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Default namespace label for registries built without an override.
pub const DEFAULT_NAMESPACE: &str = "system";

/// Builder for constructing a [`Registry`] with optional features.
pub struct RegistryBuilder {
    subscribers: Vec<Arc<dyn Subscribe>>,
    namespace: Cow<'static, str>,
}

impl RegistryBuilder {
    /// Creates a builder with no subscribers and the default namespace.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            namespace: Cow::Borrowed(DEFAULT_NAMESPACE),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive committed-mutation and lifecycle events
    /// synchronously, in commit order. The set is fixed once built.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Overrides the namespace label.
    ///
    /// The namespace only tags the registry instance - it is stamped on
    /// every event and log record it emits; semantics are unaffected.
    /// Must be chosen before any build call, like the rest of the builder.
    pub fn with_namespace(mut self, namespace: impl Into<Cow<'static, str>>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Builds an empty registry.
    pub fn build(self) -> Registry {
        let namespace: Arc<str> = Arc::from(self.namespace.as_ref());
        Registry::with_parts(SubscriberSet::new(self.subscribers), namespace)
    }

    /// Builds a registry pre-populated from an ordered sequence of specs.
    ///
    /// Equivalent to [`Registry::create`] per spec in order,
    /// short-circuiting on the first conflict.
    pub fn build_from_specs(
        self,
        specs: impl IntoIterator<Item = ComponentSpec>,
    ) -> Result<Registry, RegistryError> {
        let registry = self.build();
        for spec in specs {
            registry.create(spec)?;
        }
        Ok(registry)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
