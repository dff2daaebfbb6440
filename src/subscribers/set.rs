//! # SubscriberSet: synchronous fan-out over multiple subscribers.
//!
//! [`SubscriberSet`] delivers each [`Event`] to every subscriber, in
//! registration order, on the calling thread.
//!
//! ## What it guarantees
//! - Delivery in commit order: `emit` is called after each commit, so every
//!   subscriber sees the same sequence the registry applied.
//! - Panics inside subscribers are caught (isolation); the remaining
//!   subscribers still receive the event, followed by an
//!   `EventKind::SubscriberPanicked` naming the offender.
//!
//! ## What it does **not** guarantee
//! - No decoupling from the caller: a slow subscriber delays the operation
//!   that emitted the event.
//! - No panic event for a subscriber that panics *on* a panic event; that
//!   second failure is only logged, to keep the fault chain finite.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::error;

use crate::events::Event;

use super::Subscribe;

/// Fixed set of subscribers, fanned out to synchronously.
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a new set. The membership is fixed for the set's lifetime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Delivers one event to all subscribers, in registration order.
    ///
    /// A panicking subscriber is caught and skipped; once every subscriber
    /// has seen the original event, each panic is reported to the rest of
    /// the set as an `EventKind::SubscriberPanicked` event carrying the
    /// offender's name and the panic message.
    pub fn emit(&self, event: &Event) {
        let mut panics: Vec<(usize, Event)> = Vec::new();
        for (idx, sub) in self.subs.iter().enumerate() {
            if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| sub.on_event(event))) {
                error!(
                    subscriber = sub.name(),
                    panic = ?panic_err,
                    "subscriber panicked while handling event"
                );
                let mut report =
                    Event::subscriber_panicked(sub.name(), panic_message(panic_err.as_ref()));
                if let Some(ns) = &event.namespace {
                    report = report.with_namespace(Arc::clone(ns));
                }
                panics.push((idx, report));
            }
        }
        for (panicked, report) in panics {
            self.deliver_panic_report(panicked, &report);
        }
    }

    /// Hands a panic event to every subscriber except the offender.
    ///
    /// A second panic here is logged and dropped, never re-reported.
    fn deliver_panic_report(&self, panicked: usize, report: &Event) {
        for (idx, sub) in self.subs.iter().enumerate() {
            if idx == panicked {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| sub.on_event(report))).is_err() {
                error!(
                    subscriber = sub.name(),
                    "subscriber panicked while handling a panic event"
                );
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Seen {
        kind: EventKind,
        component: Option<String>,
        reason: Option<String>,
        namespace: Option<String>,
    }

    struct Recorder {
        seen: Mutex<Vec<Seen>>,
    }

    impl Recorder {
        fn arc() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }

        fn kinds(&self) -> Vec<EventKind> {
            self.seen.lock().unwrap().iter().map(|s| s.kind).collect()
        }
    }

    impl Subscribe for Recorder {
        fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(Seen {
                kind: event.kind,
                component: event.component.as_deref().map(str::to_string),
                reason: event.reason.as_deref().map(str::to_string),
                namespace: event.namespace.as_deref().map(str::to_string),
            });
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Panicker;

    impl Subscribe for Panicker {
        fn on_event(&self, _event: &Event) {
            panic!("handler bug");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    struct Counter(AtomicUsize);

    impl Subscribe for Counter {
        fn on_event(&self, event: &Event) {
            if !event.is_subscriber_panic() {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[test]
    fn test_emit_preserves_order_per_subscriber() {
        let rec = Recorder::arc();
        let set = SubscriberSet::new(vec![rec.clone()]);
        set.emit(&Event::new(EventKind::Created));
        set.emit(&Event::new(EventKind::Starting));
        set.emit(&Event::new(EventKind::Started));
        assert_eq!(
            rec.kinds(),
            vec![EventKind::Created, EventKind::Starting, EventKind::Started]
        );
    }

    #[test]
    fn test_panicking_subscriber_does_not_starve_the_rest() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let set = SubscriberSet::new(vec![Arc::new(Panicker), counter.clone()]);
        set.emit(&Event::new(EventKind::Created));
        set.emit(&Event::new(EventKind::Deleted));
        assert_eq!(
            counter.0.load(Ordering::Relaxed),
            2,
            "subscriber after the panicking one must still see every event"
        );
    }

    #[test]
    fn test_panic_is_reported_to_the_remaining_subscribers() {
        let rec = Recorder::arc();
        let set = SubscriberSet::new(vec![Arc::new(Panicker), rec.clone()]);
        set.emit(&Event::new(EventKind::Created));

        assert_eq!(
            rec.kinds(),
            vec![EventKind::Created, EventKind::SubscriberPanicked],
            "the original event must arrive first, then the panic report"
        );
        let seen = rec.seen.lock().unwrap();
        let report = &seen[1];
        assert_eq!(
            report.component.as_deref(),
            Some("panicker"),
            "the report must name the offender"
        );
        assert_eq!(report.reason.as_deref(), Some("handler bug"));
    }

    #[test]
    fn test_panic_report_keeps_the_namespace() {
        let rec = Recorder::arc();
        let set = SubscriberSet::new(vec![Arc::new(Panicker), rec.clone()]);
        set.emit(&Event::new(EventKind::Started).with_namespace("payments"));

        let seen = rec.seen.lock().unwrap();
        let report = seen
            .iter()
            .find(|s| s.kind == EventKind::SubscriberPanicked)
            .expect("panic report delivered");
        assert_eq!(report.namespace.as_deref(), Some("payments"));
    }

    #[test]
    fn test_panic_on_a_panic_report_is_only_logged() {
        // Both subscribers panic on everything; the second panic (on the
        // report itself) must not recurse or unwind out of emit.
        let set = SubscriberSet::new(vec![
            Arc::new(Panicker) as Arc<dyn Subscribe>,
            Arc::new(Panicker) as Arc<dyn Subscribe>,
        ]);
        set.emit(&Event::new(EventKind::Created));
    }

    #[test]
    fn test_len_and_is_empty() {
        let empty = SubscriberSet::new(Vec::new());
        assert!(empty.is_empty());
        let one = SubscriberSet::new(vec![Arc::new(Panicker) as Arc<dyn Subscribe>]);
        assert_eq!(one.len(), 1);
    }
}
