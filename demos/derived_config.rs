//! # Late-bound configuration
//!
//! Demonstrates `ConfigValue::derived`: a component whose config is computed
//! from the registry snapshot at start time, so it picks up whatever the
//! settings component holds at that moment - not what it held at create time.
//!
//! Run with: `cargo run --example derived_config`

use std::sync::Arc;

use subsys::{ComponentSpec, ConfigValue, Registry, SharedValue, StateHandle};

/// Settings the loader component carries. Non-executable: it is a pure
/// config holder and is never started.
#[derive(Clone)]
struct Settings {
    http_port: u16,
}

fn main() -> Result<(), subsys::RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let registry = Registry::new();

    registry.create(ComponentSpec::new(
        "settings",
        ConfigValue::value(Settings { http_port: 8080 }),
    ))?;

    registry.create(
        ComponentSpec::new(
            "web",
            // Resolved against the live snapshot just before web starts.
            ConfigValue::derived(|snap| {
                let settings = snap.read("settings").expect("settings registered");
                match &settings.config {
                    ConfigValue::Static(v) => v
                        .clone()
                        .downcast::<Settings>()
                        .ok()
                        .expect("settings value")
                        .http_port,
                    ConfigValue::Derived(_) => unreachable!("settings is static"),
                }
            }),
        )
        .with_start_deps(["settings"])
        .with_lifecycle(
            |cfg: SharedValue| {
                let port = cfg.downcast::<u16>().map_err(|_| "expected port")?;
                println!("🌐 web: listening on :{port}");
                Ok(Arc::new(*port) as StateHandle)
            },
            |_h: StateHandle| Ok(()),
        ),
    )?;

    // Re-point the settings *after* web was registered; the derived config
    // sees the new value because it resolves at start time.
    registry.set_config(
        "settings",
        ConfigValue::value(Settings { http_port: 9090 }),
    )?;

    registry.start("web")?;
    let web = registry.read("web")?;
    let port = web
        .state
        .expect("web started")
        .downcast::<u16>()
        .ok()
        .expect("port handle");
    println!("web started with late-bound port {port} (not 8080)");

    registry.stop_all()?;
    Ok(())
}
