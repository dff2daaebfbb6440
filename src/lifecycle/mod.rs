//! Lifecycle engine: resolution and execution.
//!
//! Internal modules:
//! - [`resolve`]: pure order computation over a snapshot (which ids, what
//!   order, cycle and missing-dependency checks);
//! - [`engine`]: sequential side-effect execution with per-step conditional
//!   commits.
//!
//! The public entry points live on [`Registry`](crate::Registry); this
//! module is wiring.

mod engine;
mod resolve;

pub(crate) use engine::{run_start, run_stop};
pub(crate) use resolve::{
    start_order, start_order_all, start_order_roots, stop_order, stop_order_all, stop_order_roots,
};
