//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] renders events through `tracing` in a compact one-line
//! format. This is primarily useful for development, debugging, and the
//! bundled demos.
//!
//! ## Output format (with a fmt subscriber installed)
//! ```text
//! INFO component registered component=db namespace=system
//! DEBUG starting component=db
//! INFO started component=db
//! ERROR start failed component=web reason="bind: address in use"
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use subsys::{LogWriter, Registry};
//!
//! let registry = Registry::builder()
//!     .with_subscribers(vec![Arc::new(LogWriter)])
//!     .build();
//! ```

use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Tracing-backed logging subscriber.
///
/// Not intended as an audit log - implement a custom [`Subscribe`] for
/// structured export or metrics collection.
pub struct LogWriter;

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let component = e.component.as_deref().unwrap_or("-");
        let namespace = e.namespace.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::Created => {
                info!(component, namespace, seq = e.seq, "component registered");
            }
            EventKind::Updated => {
                info!(component, namespace, seq = e.seq, "component updated");
            }
            EventKind::ConfigChanged => {
                debug!(component, namespace, seq = e.seq, "config replaced");
            }
            EventKind::Deleted => {
                info!(component, namespace, seq = e.seq, "component deleted");
            }
            EventKind::Starting => {
                debug!(component, namespace, seq = e.seq, "starting");
            }
            EventKind::Started => {
                info!(component, namespace, seq = e.seq, "started");
            }
            EventKind::StartFailed => {
                error!(
                    component,
                    namespace,
                    seq = e.seq,
                    reason = e.reason.as_deref().unwrap_or(""),
                    "start failed"
                );
            }
            EventKind::Stopping => {
                debug!(component, namespace, seq = e.seq, "stopping");
            }
            EventKind::Stopped => {
                info!(component, namespace, seq = e.seq, "stopped");
            }
            EventKind::StopFailed => {
                error!(
                    component,
                    namespace,
                    seq = e.seq,
                    reason = e.reason.as_deref().unwrap_or(""),
                    "stop failed"
                );
            }
            EventKind::SubscriberPanicked => {
                warn!(
                    subscriber = component,
                    namespace,
                    seq = e.seq,
                    reason = e.reason.as_deref().unwrap_or(""),
                    "subscriber panicked"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
