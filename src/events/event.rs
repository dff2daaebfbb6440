//! # Registry events emitted on committed mutations and lifecycle transitions.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **CRUD events**: committed mapping changes (created, updated, deleted)
//! - **Lifecycle events**: component transitions (starting, started, failures)
//! - **Subscriber events**: observation-plumbing faults (panics)
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! component id, failure reasons, and the registry namespace.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Within one registry, events are emitted in commit order;
//! `seq` restores the global order when events from several registries mix.
//!
//! ## Example
//! ```rust
//! use subsys::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::StartFailed)
//!     .with_component("db")
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::StartFailed);
//! assert_eq!(ev.component.as_deref(), Some("db"));
//! assert_eq!(ev.reason.as_deref(), Some("connection refused"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of registry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === CRUD events ===
    /// A component was registered.
    ///
    /// Sets:
    /// - `component`: the new id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Created,

    /// A component's declared fields were replaced by `update`.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Updated,

    /// A component's config was replaced by `set_config`.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ConfigChanged,

    /// A component was removed from the registry.
    ///
    /// Sets:
    /// - `component`: the removed id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Deleted,

    // === Lifecycle events ===
    /// A component's start function is about to run.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Starting,

    /// A component committed the transition to started.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Started,

    /// A start function returned an error; the closure was aborted.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `reason`: the error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StartFailed,

    /// A component's stop function is about to run.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Stopping,

    /// A component committed the transition to stopped.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Stopped,

    /// A stop function returned an error; the component stays started.
    ///
    /// Sets:
    /// - `component`: the id
    /// - `reason`: the error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StopFailed,

    // === Subscriber events ===
    /// A subscriber panicked while handling an event.
    ///
    /// Sets:
    /// - `component`: subscriber name
    /// - `reason`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,
}

/// Registry event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Component id (or subscriber name for subscriber events).
    pub component: Option<Arc<str>>,
    /// Human-readable reason (errors, panic details).
    pub reason: Option<Arc<str>>,
    /// Namespace of the registry that emitted the event.
    pub namespace: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            component: None,
            reason: None,
            namespace: None,
        }
    }

    /// Attaches a component id.
    #[inline]
    pub fn with_component(mut self, id: impl Into<Arc<str>>) -> Self {
        self.component = Some(id.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the emitting registry's namespace.
    #[inline]
    pub fn with_namespace(mut self, ns: impl Into<Arc<str>>) -> Self {
        self.namespace = Some(ns.into());
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_component(subscriber)
            .with_reason(info)
    }

    /// True for [`EventKind::SubscriberPanicked`] reports.
    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}
