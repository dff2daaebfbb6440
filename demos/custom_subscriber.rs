//! # Custom event subscriber
//!
//! Demonstrates the `Subscribe` trait: an audit trail that records every
//! lifecycle transition, and what panic isolation looks like (a broken
//! subscriber never breaks the registry operation that emitted the event).
//!
//! Run with: `cargo run --example custom_subscriber`

use std::sync::{Arc, Mutex};

use subsys::{
    ComponentSpec,
    ConfigValue,
    Event,
    EventKind,
    Registry,
    SharedValue,
    StateHandle,
    Subscribe,
};

/// Records every transition with its global sequence number.
struct AuditTrail {
    entries: Mutex<Vec<String>>,
}

impl Subscribe for AuditTrail {
    fn on_event(&self, ev: &Event) {
        let component = ev.component.as_deref().unwrap_or("-");
        let line = match ev.kind {
            EventKind::Created => format!("#{} created {component}", ev.seq),
            EventKind::Starting => format!("#{} starting {component}", ev.seq),
            EventKind::Started => format!("#{} started {component}", ev.seq),
            EventKind::Stopping => format!("#{} stopping {component}", ev.seq),
            EventKind::Stopped => format!("#{} stopped {component}", ev.seq),
            _ => return,
        };
        self.entries.lock().unwrap().push(line);
    }

    fn name(&self) -> &'static str {
        "audit"
    }
}

/// Deliberately broken: panics on every event.
struct Flaky;

impl Subscribe for Flaky {
    fn on_event(&self, _ev: &Event) {
        panic!("flaky subscriber bug");
    }

    fn name(&self) -> &'static str {
        "flaky"
    }
}

fn main() -> Result<(), subsys::RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let audit = Arc::new(AuditTrail {
        entries: Mutex::new(Vec::new()),
    });

    // The flaky subscriber panics on every event; the audit trail after it
    // still sees everything, and every registry call still succeeds.
    let registry = Registry::builder()
        .with_subscribers(vec![Arc::new(Flaky), audit.clone()])
        .build();

    registry.create(
        ComponentSpec::new("worker", ConfigValue::value(4usize)).with_lifecycle(
            |_cfg: SharedValue| Ok(Arc::new(()) as StateHandle),
            |_h: StateHandle| Ok(()),
        ),
    )?;
    registry.start("worker")?;
    registry.stop("worker")?;

    println!("audit trail:");
    for line in audit.entries.lock().unwrap().iter() {
        println!("  {line}");
    }
    Ok(())
}
