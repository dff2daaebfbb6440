//! # A three-tier stack brought up and down by dependency order
//!
//! Demonstrates basic subsys features:
//! - Declarative registration with `Registry::from_specs`
//! - Dependency-ordered startup (`start("web")` pulls in cache and db)
//! - Derived reverse edges on shutdown (`stop_all` stops web first)
//! - The bundled `LogWriter` subscriber
//!
//! Run with: `cargo run --example web_stack`

use std::sync::Arc;

use subsys::{
    ComponentSpec,
    ConfigValue,
    LogWriter,
    Registry,
    SharedValue,
    StateHandle,
};

fn database() -> ComponentSpec {
    ComponentSpec::new("db", ConfigValue::value("postgres://localhost/app")).with_lifecycle(
        |cfg: SharedValue| {
            let url = cfg.downcast::<&str>().map_err(|_| "expected url")?;
            println!("🗄  db: connecting to {url}");
            Ok(Arc::new("connection-pool") as StateHandle)
        },
        |_h: StateHandle| {
            println!("🗄  db: pool closed");
            Ok(())
        },
    )
}

fn cache() -> ComponentSpec {
    ComponentSpec::new("cache", ConfigValue::value(10_000usize))
        .with_start_deps(["db"])
        .with_lifecycle(
            |cfg: SharedValue| {
                let entries = cfg.downcast::<usize>().map_err(|_| "expected capacity")?;
                println!("⚡ cache: warmed with room for {entries} entries");
                Ok(Arc::new("cache-handle") as StateHandle)
            },
            |_h: StateHandle| {
                println!("⚡ cache: flushed");
                Ok(())
            },
        )
}

fn web() -> ComponentSpec {
    ComponentSpec::new("web", ConfigValue::value(8080u16))
        .with_start_deps(["cache"])
        .with_lifecycle(
            |cfg: SharedValue| {
                let port = cfg.downcast::<u16>().map_err(|_| "expected port")?;
                println!("🌐 web: listening on :{port}");
                Ok(Arc::new("listener") as StateHandle)
            },
            |_h: StateHandle| {
                println!("🌐 web: drained and closed");
                Ok(())
            },
        )
}

fn main() -> Result<(), subsys::RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let registry = Registry::builder()
        .with_subscribers(vec![Arc::new(LogWriter)])
        .with_namespace("demo")
        .build_from_specs([database(), cache(), web()])?;

    // Starting the top of the stack brings up everything below it first.
    let started = registry.start("web")?;
    println!(
        "started in order: {:?}",
        started.iter().map(|id| id.as_str()).collect::<Vec<_>>()
    );

    // Reverse edges are derived: web stops before cache, cache before db.
    let stopped = registry.stop_all()?;
    println!(
        "stopped in order: {:?}",
        stopped.iter().map(|id| id.as_str()).collect::<Vec<_>>()
    );

    Ok(())
}
