//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for plugging custom event
//! handlers into a registry.
//!
//! Each subscriber gets:
//! - **Synchronous delivery** on the thread that committed the mutation
//! - **Commit-order events** (per registry)
//! - **Panic isolation** (panics are caught, reported to the remaining
//!   subscribers as `EventKind::SubscriberPanicked`, and never propagated
//!   into the registry operation that emitted the event)
//!
//! ## Rules
//! - Subscribers observe committed state only; they cannot veto a mutation.
//! - A slow subscriber delays the caller that emitted the event, since
//!   delivery is synchronous. Keep handlers short; hand off to a channel or
//!   thread for heavy work.
//! - Do not call back into the registry from `on_event`: the emitting
//!   operation may still be mid-closure.
//!
//! ## Example
//! ```rust
//! use subsys::{Event, EventKind, Subscribe};
//!
//! struct Metrics;
//!
//! impl Subscribe for Metrics {
//!     fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::StartFailed) {
//!             // export a metric, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//! ```

use crate::events::Event;

/// Event subscriber for registry observability.
///
/// ### Implementation requirements
/// - Handle errors internally; do not panic.
/// - Return quickly; delivery is synchronous on the committing thread.
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called on the thread that committed the mutation, after the commit.
    /// Panics are caught and reported to the rest of the set as
    /// `EventKind::SubscriberPanicked`; the registry operation still
    /// succeeds.
    fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs and panic events.
    ///
    /// Prefer short, descriptive names (e.g., "metrics", "audit").
    /// The default uses `type_name::<Self>()`, which can be verbose -
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
