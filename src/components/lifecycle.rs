//! # Start/stop behavior of a component.
//!
//! [`Lifecycle`] bundles the start and stop functions into one struct, so a
//! component either has both or neither; a lopsided pair cannot be built.
//!
//! ## Concurrency semantics
//! - Functions run synchronously on the calling thread; a hung function
//!   blocks its caller. There is no timeout or cancellation.
//! - A start function may run and then lose the bookkeeping commit to a
//!   concurrent caller; its freshly created handle is dropped. Start
//!   functions that acquire external resources should return guard types
//!   whose `Drop` releases them.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use subsys::{Lifecycle, SharedValue, StateHandle};
//!
//! let lc = Lifecycle::new(
//!     |cfg: SharedValue| {
//!         let port = *cfg.downcast::<u16>().map_err(|_| "expected u16 port")?;
//!         Ok(Arc::new(format!("listening on :{port}")) as StateHandle)
//!     },
//!     |_handle: StateHandle| Ok(()),
//! );
//! let handle = lc.start(Arc::new(8080u16)).unwrap();
//! lc.stop(handle).unwrap();
//! ```

use std::sync::Arc;

use crate::components::SharedValue;
use crate::error::BoxError;

/// Opaque handle produced by a start function and consumed by the matching
/// stop function.
pub type StateHandle = Arc<dyn std::any::Any + Send + Sync>;

/// User start function: resolved config in, state handle out.
pub type StartFn = Arc<dyn Fn(SharedValue) -> Result<StateHandle, BoxError> + Send + Sync>;

/// User stop function: consumes the handle its start produced.
pub type StopFn = Arc<dyn Fn(StateHandle) -> Result<(), BoxError> + Send + Sync>;

/// Start/stop pair of an executable component.
///
/// Components without a `Lifecycle` are non-executable: registrable,
/// enumerable, usable as config sources, but never started.
#[derive(Clone)]
pub struct Lifecycle {
    start: StartFn,
    stop: StopFn,
}

impl Lifecycle {
    /// Creates a lifecycle from a start and a stop closure.
    pub fn new<S, T>(start: S, stop: T) -> Self
    where
        S: Fn(SharedValue) -> Result<StateHandle, BoxError> + Send + Sync + 'static,
        T: Fn(StateHandle) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            start: Arc::new(start),
            stop: Arc::new(stop),
        }
    }

    /// Invokes the start function with a resolved config value.
    pub fn start(&self, config: SharedValue) -> Result<StateHandle, BoxError> {
        (self.start)(config)
    }

    /// Invokes the stop function with the handle from the last start.
    pub fn stop(&self, handle: StateHandle) -> Result<(), BoxError> {
        (self.stop)(handle)
    }
}
