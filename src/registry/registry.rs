//! # Registry - the single source of truth for components.
//!
//! The [`Registry`] owns the `id -> component` mapping and is the only way
//! to touch it: CRUD calls are single atomic transforms, lifecycle calls
//! resolve an order against a snapshot and then execute and commit step by
//! step.
//!
//! ## Architecture
//! ```text
//! caller ──► Registry
//!              ├─► CRUD: Store::transform (one CAS, retried on contention)
//!              ├─► lifecycle: resolve(Snapshot) ─► engine::run_{start,stop}
//!              └─► emit(Event) ─► SubscriberSet (synchronous, commit order)
//! ```
//!
//! ## Rules
//! - CRUD failures leave the mapping byte-for-byte unchanged.
//! - Lifecycle failures are positional: earlier closure members stay
//!   transitioned, the failing id and the rest are untouched.
//! - `status` and `state` belong to the lifecycle engine; `update` and
//!   `set_config` never touch them.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::components::{Component, ComponentId, ComponentSpec, ConfigValue, Status};
use crate::error::RegistryError;
use crate::events::{Event, EventKind};
use crate::lifecycle;
use crate::registry::builder::RegistryBuilder;
use crate::registry::snapshot::Snapshot;
use crate::registry::store::Store;
use crate::subscribers::SubscriberSet;

/// Shared component-lifecycle registry.
///
/// All operations are synchronous and safe to call from any thread; the
/// registry itself is usually wrapped in an `Arc` and cloned around.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use subsys::{ComponentSpec, ConfigValue, Registry, SharedValue, StateHandle};
///
/// let registry = Registry::new();
/// registry.create(
///     ComponentSpec::new("db", ConfigValue::value("postgres://localhost"))
///         .with_lifecycle(
///             |_cfg: SharedValue| Ok(Arc::new("pool") as StateHandle),
///             |_h: StateHandle| Ok(()),
///         ),
/// )?;
/// registry.start("db")?;
/// assert!(registry.is_started("db")?);
/// registry.stop_all()?;
/// assert!(registry.started_ids().is_empty());
/// # Ok::<(), subsys::RegistryError>(())
/// ```
pub struct Registry {
    store: Store,
    subscribers: SubscriberSet,
    namespace: Arc<str>,
}

impl Registry {
    /// Creates an empty registry with no subscribers and the default
    /// namespace. Use [`Registry::builder`] to configure either.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    /// Returns a builder for subscriber and namespace configuration.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from an ordered sequence of specs.
    ///
    /// Equivalent to calling [`Registry::create`] for each spec in order,
    /// short-circuiting on the first conflict.
    pub fn from_specs(
        specs: impl IntoIterator<Item = ComponentSpec>,
    ) -> Result<Self, RegistryError> {
        RegistryBuilder::new().build_from_specs(specs)
    }

    pub(crate) fn with_parts(subscribers: SubscriberSet, namespace: Arc<str>) -> Self {
        Self {
            store: Store::new(),
            subscribers,
            namespace,
        }
    }

    /// The namespace label stamped on every event and log record.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // ---------------------------
    // CRUD
    // ---------------------------

    /// Registers a new component.
    ///
    /// Fails with `Conflict` if the id is already present; the mapping is
    /// unchanged in that case.
    pub fn create(&self, spec: ComponentSpec) -> Result<ComponentId, RegistryError> {
        let id = spec.id().clone();
        self.store.transform(|map| {
            if map.contains_key(id.as_str()) {
                return Err(RegistryError::Conflict {
                    id: id.clone(),
                    detail: "id already registered".into(),
                });
            }
            let mut next = map.clone();
            next.insert(id.clone(), spec.clone().into_component());
            Ok((next, ()))
        })?;
        trace!(component = id.as_str(), namespace = %self.namespace, "created");
        self.emit(Event::new(EventKind::Created).with_component(id.as_str()));
        Ok(id)
    }

    /// Returns a clone of the record for `id`, or `NotFound`.
    pub fn read(&self, id: &str) -> Result<Component, RegistryError> {
        self.snapshot().read(id).cloned()
    }

    /// Replaces the declared fields of an existing component.
    ///
    /// `id` selects the record; `status` and `state` are lifecycle-owned and
    /// survive the update untouched. Fails with `NotFound` if absent.
    pub fn update(&self, spec: ComponentSpec) -> Result<ComponentId, RegistryError> {
        let id = spec.id().clone();
        self.store.transform(|map| {
            let existing = map.get(id.as_str()).ok_or_else(|| RegistryError::NotFound {
                id: id.clone(),
            })?;
            let mut next = map.clone();
            next.insert(id.clone(), spec.clone().apply_to(existing));
            Ok((next, ()))
        })?;
        trace!(component = id.as_str(), namespace = %self.namespace, "updated");
        self.emit(Event::new(EventKind::Updated).with_component(id.as_str()));
        Ok(id)
    }

    /// Replaces only the config of an existing component.
    pub fn set_config(&self, id: &str, config: ConfigValue) -> Result<(), RegistryError> {
        self.store.transform(|map| {
            let existing = map.get(id).ok_or_else(|| RegistryError::NotFound {
                id: ComponentId::from(id),
            })?;
            let mut updated = existing.clone();
            updated.config = config.clone();
            let mut next = map.clone();
            next.insert(existing.id.clone(), updated);
            Ok((next, ()))
        })?;
        trace!(component = id, namespace = %self.namespace, "config replaced");
        self.emit(Event::new(EventKind::ConfigChanged).with_component(id));
        Ok(())
    }

    /// Removes a stopped component.
    ///
    /// Fails with `Conflict` while the component is started, and with
    /// `NotFound` if it is absent. Remaining ids keep their
    /// first-registration order.
    pub fn delete(&self, id: &str) -> Result<(), RegistryError> {
        self.store.transform(|map| {
            let existing = map.get(id).ok_or_else(|| RegistryError::NotFound {
                id: ComponentId::from(id),
            })?;
            if existing.status == Status::Started {
                return Err(RegistryError::Conflict {
                    id: existing.id.clone(),
                    detail: "component is started".into(),
                });
            }
            let mut next = map.clone();
            next.shift_remove(id);
            Ok((next, ()))
        })?;
        trace!(component = id, namespace = %self.namespace, "deleted");
        self.emit(Event::new(EventKind::Deleted).with_component(id));
        Ok(())
    }

    // ---------------------------
    // Queries
    // ---------------------------

    /// Takes an immutable point-in-time view of the whole mapping.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.store.load())
    }

    /// All ids, in first-registration order.
    pub fn list_all_ids(&self) -> Vec<ComponentId> {
        self.snapshot().ids()
    }

    /// Ids of started components, in first-registration order.
    pub fn started_ids(&self) -> Vec<ComponentId> {
        self.snapshot().started_ids()
    }

    /// Ids of stopped components, in first-registration order.
    pub fn stopped_ids(&self) -> Vec<ComponentId> {
        self.snapshot().stopped_ids()
    }

    /// True if `id` is started; `NotFound` if absent.
    pub fn is_started(&self, id: &str) -> Result<bool, RegistryError> {
        Ok(self.snapshot().read(id)?.status == Status::Started)
    }

    /// True if `id` is stopped; `NotFound` if absent.
    pub fn is_stopped(&self, id: &str) -> Result<bool, RegistryError> {
        Ok(self.snapshot().read(id)?.status == Status::Stopped)
    }

    /// True if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.snapshot().contains(id)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// True if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    // ---------------------------
    // Lifecycle
    // ---------------------------

    /// Starts `id` and its not-yet-started transitive dependencies,
    /// dependencies first.
    ///
    /// Already started is a no-op success. Returns the ids actually
    /// transitioned by this call, in execution order.
    pub fn start(&self, id: &str) -> Result<Vec<ComponentId>, RegistryError> {
        let snap = self.snapshot();
        let comp = snap.read(id)?;
        if comp.is_started() {
            debug!(component = id, namespace = %self.namespace, "start: already started");
            return Ok(Vec::new());
        }
        let order = lifecycle::start_order(&snap, &comp.id)?;
        lifecycle::run_start(self, &order)
    }

    /// Stops `id` and its started transitive dependents, dependents first.
    ///
    /// Already stopped is a no-op success. Returns the ids actually
    /// transitioned by this call, in execution order.
    pub fn stop(&self, id: &str) -> Result<Vec<ComponentId>, RegistryError> {
        let snap = self.snapshot();
        let comp = snap.read(id)?;
        if !comp.is_started() {
            debug!(component = id, namespace = %self.namespace, "stop: already stopped");
            return Ok(Vec::new());
        }
        let order = lifecycle::stop_order(&snap, &comp.id)?;
        lifecycle::run_stop(self, &order)
    }

    /// Starts every registered component, in first-registration order.
    pub fn start_all(&self) -> Result<Vec<ComponentId>, RegistryError> {
        let snap = self.snapshot();
        let order = lifecycle::start_order_all(&snap)?;
        lifecycle::run_start(self, &order)
    }

    /// Stops every registered component, in reverse first-registration order.
    pub fn stop_all(&self) -> Result<Vec<ComponentId>, RegistryError> {
        let snap = self.snapshot();
        let order = lifecycle::stop_order_all(&snap)?;
        lifecycle::run_stop(self, &order)
    }

    /// Starts the given roots plus their full transitive dependency
    /// closures, even where closure members are outside the list.
    pub fn start_many<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<ComponentId>, RegistryError> {
        let roots: Vec<ComponentId> = ids.into_iter().map(ComponentId::from).collect();
        let snap = self.snapshot();
        let order = lifecycle::start_order_roots(&snap, &roots)?;
        lifecycle::run_start(self, &order)
    }

    /// Stops the given roots plus their full transitive dependent closures.
    pub fn stop_many<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<ComponentId>, RegistryError> {
        let roots: Vec<ComponentId> = ids.into_iter().map(ComponentId::from).collect();
        let snap = self.snapshot();
        let order = lifecycle::stop_order_roots(&snap, &roots)?;
        lifecycle::run_stop(self, &order)
    }

    // ---------------------------
    // Internals
    // ---------------------------

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    /// Stamps the namespace and fans the event out to subscribers.
    pub(crate) fn emit(&self, event: Event) {
        if self.subscribers.is_empty() {
            return;
        }
        self.subscribers
            .emit(&event.with_namespace(Arc::clone(&self.namespace)));
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("namespace", &self.namespace)
            .field("components", &self.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{SharedValue, StateHandle};
    use std::sync::{Barrier, Mutex};

    fn plain(id: &str) -> ComponentSpec {
        ComponentSpec::new(id, ConfigValue::value(()))
    }

    fn noop(id: &str, deps: &[&str]) -> ComponentSpec {
        plain(id)
            .with_start_deps(deps.iter().copied())
            .with_lifecycle(
                |_cfg: SharedValue| Ok(Arc::new(()) as StateHandle),
                |_h: StateHandle| Ok(()),
            )
    }

    fn names(ids: &[ComponentId]) -> Vec<&str> {
        ids.iter().map(|id| id.as_str()).collect()
    }

    // --- CRUD ---

    #[test]
    fn test_duplicate_create_is_conflict_and_count_unchanged() {
        let reg = Registry::new();
        reg.create(plain("db")).expect("first create");
        let err = reg.create(plain("db")).unwrap_err();
        assert!(err.is_conflict(), "expected Conflict, got {err}");
        assert_eq!(reg.len(), 1, "failed create must not change the count");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let reg = Registry::new();
        assert!(reg.read("ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_replaces_declared_fields_only() {
        let reg = Registry::new();
        reg.create(noop("db", &[])).expect("create");
        reg.start("db").expect("start");

        reg.update(noop("db", &["loader"])).expect("update");
        let comp = reg.read("db").expect("read");
        assert_eq!(names(&comp.start_deps), ["loader"]);
        assert!(comp.is_started(), "update must not touch status");
        assert!(comp.state.is_some(), "update must not touch state");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let reg = Registry::new();
        assert!(reg.update(plain("ghost")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_config_is_narrow() {
        let reg = Registry::new();
        reg.create(plain("db").with_start_deps(["loader"]))
            .expect("create");
        reg.set_config("db", ConfigValue::value(5432u16))
            .expect("set_config");
        let comp = reg.read("db").expect("read");
        assert_eq!(names(&comp.start_deps), ["loader"], "deps must survive");
        assert!(reg.set_config("ghost", ConfigValue::value(())).is_err());
    }

    #[test]
    fn test_delete_guard_on_started_component() {
        let reg = Registry::new();
        reg.create(noop("db", &[])).expect("create");
        reg.start("db").expect("start");

        let err = reg.delete("db").unwrap_err();
        assert!(err.is_conflict());
        assert!(reg.contains("db"), "component must remain present");
        assert!(reg.is_started("db").expect("query"), "and still started");

        reg.stop("db").expect("stop");
        reg.delete("db").expect("delete after stop");
        assert!(!reg.contains("db"));
    }

    #[test]
    fn test_list_all_ids_keeps_first_registration_order() {
        let reg = Registry::new();
        for id in ["web", "db", "cache"] {
            reg.create(plain(id)).expect("create");
        }
        assert_eq!(names(&reg.list_all_ids()), ["web", "db", "cache"]);

        // Deleting the middle one keeps the rest in order.
        reg.delete("db").expect("delete");
        assert_eq!(names(&reg.list_all_ids()), ["web", "cache"]);
    }

    #[test]
    fn test_predicates_fail_on_missing_id() {
        let reg = Registry::new();
        assert!(reg.is_started("ghost").unwrap_err().is_not_found());
        assert!(reg.is_stopped("ghost").unwrap_err().is_not_found());
    }

    // --- lifecycle: ordering and idempotence ---

    #[test]
    fn test_start_closure_orders_deps_first() {
        let reg = Registry::new();
        reg.create(noop("a", &["b"])).expect("create a");
        reg.create(noop("b", &["c"])).expect("create b");
        reg.create(noop("c", &[])).expect("create c");

        let transitioned = reg.start("a").expect("start");
        assert_eq!(names(&transitioned), ["c", "b", "a"]);
        assert_eq!(names(&reg.started_ids()), ["a", "b", "c"]);
    }

    #[test]
    fn test_stop_closure_orders_dependents_first() {
        let reg = Registry::new();
        reg.create(noop("a", &["b"])).expect("create a");
        reg.create(noop("b", &["c"])).expect("create b");
        reg.create(noop("c", &[])).expect("create c");
        reg.start("a").expect("start");

        let transitioned = reg.stop("c").expect("stop");
        assert_eq!(names(&transitioned), ["a", "b", "c"]);
        assert!(reg.started_ids().is_empty());
    }

    #[test]
    fn test_start_is_idempotent_and_keeps_the_handle() {
        let reg = Registry::new();
        reg.create(
            plain("db").with_lifecycle(
                |_cfg| Ok(Arc::new(7u32) as StateHandle),
                |_h| Ok(()),
            ),
        )
        .expect("create");

        reg.start("db").expect("first start");
        let first = reg.read("db").expect("read").state.expect("handle");
        let transitioned = reg.start("db").expect("second start");
        assert!(transitioned.is_empty(), "no-op must transition nothing");
        let second = reg.read("db").expect("read").state.expect("handle");
        assert!(
            Arc::ptr_eq(&first, &second),
            "repeated start must keep the previous handle"
        );
    }

    #[test]
    fn test_stop_is_idempotent() {
        let reg = Registry::new();
        reg.create(noop("db", &[])).expect("create");
        assert!(reg.stop("db").expect("stop on stopped").is_empty());
    }

    #[test]
    fn test_start_missing_dependency_fails() {
        let reg = Registry::new();
        reg.create(noop("web", &["ghost"])).expect("create");
        let err = reg.start("web").unwrap_err();
        assert_eq!(err.as_label(), "missing_dependency");
        assert!(reg.started_ids().is_empty());
    }

    #[test]
    fn test_start_cycle_fails_instead_of_recursing() {
        let reg = Registry::new();
        reg.create(noop("a", &["b"])).expect("create a");
        reg.create(noop("b", &["a"])).expect("create b");
        let err = reg.start("a").unwrap_err();
        assert_eq!(err.as_label(), "dependency_cycle");
    }

    #[test]
    fn test_non_executable_component_is_skipped_not_started() {
        let reg = Registry::new();
        reg.create(plain("settings")).expect("create settings");
        reg.create(noop("db", &["settings"])).expect("create db");

        let transitioned = reg.start("db").expect("start");
        assert_eq!(names(&transitioned), ["db"]);
        assert!(reg.is_stopped("settings").expect("query"));
        let settings = reg.read("settings").expect("read");
        assert!(settings.state.is_none(), "non-executables never hold state");
    }

    // --- lifecycle: config resolution ---

    #[test]
    fn test_derived_config_resolves_at_start_time() {
        let reg = Registry::new();
        reg.create(plain("loader")).expect("create loader");
        reg.create(
            ComponentSpec::new(
                "web",
                ConfigValue::derived(|snap| {
                    // Read the loader's config out of the snapshot.
                    let loader = snap.read("loader").expect("loader registered");
                    match &loader.config {
                        ConfigValue::Static(v) => *v
                            .clone()
                            .downcast::<u16>()
                            .ok()
                            .expect("loader config is a port"),
                        ConfigValue::Derived(_) => unreachable!("loader is static"),
                    }
                }),
            )
            .with_start_deps(["loader"])
            .with_lifecycle(
                |cfg| {
                    let port = *cfg.downcast::<u16>().ok().expect("derived port");
                    Ok(Arc::new(port) as StateHandle)
                },
                |_h| Ok(()),
            ),
        )
        .expect("create web");

        // The value set *after* create is what the dependent must see.
        reg.set_config("loader", ConfigValue::value(9090u16))
            .expect("set_config");
        reg.start("web").expect("start");
        let handle = reg.read("web").expect("read").state.expect("handle");
        assert_eq!(*handle.downcast::<u16>().ok().expect("port handle"), 9090);
    }

    // --- lifecycle: partial failure ---

    #[test]
    fn test_start_failure_is_positional() {
        let reg = Registry::new();
        reg.create(noop("db", &[])).expect("create db");
        reg.create(
            plain("cache")
                .with_start_deps(["db"])
                .with_lifecycle(|_cfg| Err("warmup failed".into()), |_h| Ok(())),
        )
        .expect("create cache");
        reg.create(noop("web", &["cache"])).expect("create web");

        let err = reg.start("web").unwrap_err();
        assert_eq!(err.as_label(), "start_failed");
        assert_eq!(err.component().map(|id| id.as_str()), Some("cache"));

        // db (earlier in the closure) stays started; cache and web untouched.
        assert_eq!(names(&reg.started_ids()), ["db"]);
        assert!(reg.is_stopped("cache").expect("query"));
        assert!(reg.is_stopped("web").expect("query"));
    }

    #[test]
    fn test_stop_failure_keeps_component_started_with_its_handle() {
        let reg = Registry::new();
        reg.create(plain("db").with_lifecycle(
            |_cfg| Ok(Arc::new(1u8) as StateHandle),
            |_h| Err("drain failed".into()),
        ))
        .expect("create");
        reg.start("db").expect("start");

        let err = reg.stop("db").unwrap_err();
        assert_eq!(err.as_label(), "stop_failed");
        let comp = reg.read("db").expect("read");
        assert!(comp.is_started(), "failed stop must leave status intact");
        assert!(comp.state.is_some(), "and the handle intact");
    }

    // --- bulk and list variants ---

    #[test]
    fn test_end_to_end_db_cache_web() {
        let order_log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let reg = Registry::new();
        for (id, deps) in [("db", vec![]), ("cache", vec!["db"]), ("web", vec!["cache"])] {
            let stop_log = Arc::clone(&order_log);
            let name = id.to_string();
            reg.create(
                plain(id).with_start_deps(deps).with_lifecycle(
                    |_cfg| Ok(Arc::new(()) as StateHandle),
                    move |_h| {
                        stop_log.lock().unwrap().push(name.clone());
                        Ok(())
                    },
                ),
            )
            .expect("create");
        }

        reg.start("web").expect("start web");
        assert_eq!(names(&reg.started_ids()), ["db", "cache", "web"]);

        reg.stop_all().expect("stop_all");
        assert!(reg.started_ids().is_empty());
        assert_eq!(
            *order_log.lock().unwrap(),
            vec!["web", "cache", "db"],
            "stop functions must run dependents-first"
        );
    }

    #[test]
    fn test_start_all_then_partial_stop_many() {
        let reg = Registry::new();
        reg.create(noop("db", &[])).expect("create");
        reg.create(noop("cache", &["db"])).expect("create");
        reg.create(noop("jobs", &["db"])).expect("create");

        let transitioned = reg.start_all().expect("start_all");
        assert_eq!(names(&transitioned), ["db", "cache", "jobs"]);

        // Stopping db pulls in both dependents even though only db is named.
        let stopped = reg.stop_many(["db"]).expect("stop_many");
        assert_eq!(stopped.len(), 3);
        assert!(reg.started_ids().is_empty());
    }

    #[test]
    fn test_start_many_skips_already_started_roots() {
        let reg = Registry::new();
        reg.create(noop("db", &[])).expect("create");
        reg.create(noop("web", &["db"])).expect("create");
        reg.start("db").expect("start db");

        let transitioned = reg.start_many(["db", "web"]).expect("start_many");
        assert_eq!(names(&transitioned), ["web"]);
    }

    #[test]
    fn test_debug_reports_shape_not_contents() {
        let reg = Registry::builder().with_namespace("payments").build();
        reg.create(plain("db")).expect("create");
        let rendered = format!("{reg:?}");
        assert!(
            rendered.contains("payments") && rendered.contains("components: 1"),
            "unexpected Debug output: {rendered}"
        );
    }

    // --- concurrency ---

    #[test]
    fn test_concurrent_starts_commit_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let starts = Arc::new(AtomicUsize::new(0));
        let reg = Arc::new(Registry::new());
        let counter = Arc::clone(&starts);
        reg.create(plain("db").with_lifecycle(
            move |_cfg| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(()) as StateHandle)
            },
            |_h| Ok(()),
        ))
        .expect("create");

        let barrier = Arc::new(Barrier::new(4));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reg = Arc::clone(&reg);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    reg.start("db")
                })
            })
            .collect();

        let mut wins = 0;
        for h in handles {
            match h.join().expect("starter thread") {
                Ok(ids) if !ids.is_empty() => wins += 1,
                // No-op (already started) or a lost commit race: both fine.
                Ok(_) => {}
                Err(err) => assert!(
                    err.is_conflict(),
                    "losers may only see Conflict, got {err}"
                ),
            }
        }
        assert_eq!(wins, 1, "exactly one caller commits the transition");
        assert!(reg.is_started("db").expect("query"));
        assert!(
            starts.load(Ordering::SeqCst) >= 1,
            "the side effect ran at least once"
        );
    }

    // --- observation ---

    #[test]
    fn test_events_follow_commit_order_and_carry_namespace() {
        use crate::subscribers::Subscribe;

        struct Recorder {
            seen: Mutex<Vec<(EventKind, Option<String>, Option<String>)>>,
        }

        impl Subscribe for Recorder {
            fn on_event(&self, ev: &Event) {
                self.seen.lock().unwrap().push((
                    ev.kind,
                    ev.component.as_deref().map(str::to_string),
                    ev.namespace.as_deref().map(str::to_string),
                ));
            }

            fn name(&self) -> &'static str {
                "recorder"
            }
        }

        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let reg = Registry::builder()
            .with_subscribers(vec![recorder.clone()])
            .with_namespace("payments")
            .build();

        reg.create(noop("db", &[])).expect("create");
        reg.start("db").expect("start");
        reg.stop("db").expect("stop");
        reg.delete("db").expect("delete");

        let seen = recorder.seen.lock().unwrap();
        let kinds: Vec<EventKind> = seen.iter().map(|(k, _, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Created,
                EventKind::Starting,
                EventKind::Started,
                EventKind::Stopping,
                EventKind::Stopped,
                EventKind::Deleted,
            ],
            "events must arrive in commit order"
        );
        for (kind, component, namespace) in seen.iter() {
            assert_eq!(component.as_deref(), Some("db"), "missing id on {kind:?}");
            assert_eq!(
                namespace.as_deref(),
                Some("payments"),
                "missing namespace on {kind:?}"
            );
        }
    }

    #[test]
    fn test_failed_crud_emits_nothing() {
        use crate::subscribers::Subscribe;
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counter(AtomicUsize);

        impl Subscribe for Counter {
            fn on_event(&self, _ev: &Event) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }

            fn name(&self) -> &'static str {
                "counter"
            }
        }

        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let reg = Registry::builder()
            .with_subscribers(vec![counter.clone()])
            .build();

        reg.create(plain("db")).expect("create");
        let after_create = counter.0.load(Ordering::Relaxed);

        assert!(reg.create(plain("db")).is_err());
        assert!(reg.update(plain("ghost")).is_err());
        assert!(reg.delete("ghost").is_err());
        assert_eq!(
            counter.0.load(Ordering::Relaxed),
            after_create,
            "failed transforms must leave no trace beyond the error"
        );
    }

    #[test]
    fn test_concurrent_creates_keep_uniqueness() {
        let reg = Arc::new(Registry::new());
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&reg);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    reg.create(plain("db")).is_ok()
                })
            })
            .collect();
        let oks = handles
            .into_iter()
            .map(|h| h.join().expect("creator thread"))
            .filter(|ok| *ok)
            .count();
        assert_eq!(oks, 1, "only one duplicate create may succeed");
        assert_eq!(reg.len(), 1);
    }
}
