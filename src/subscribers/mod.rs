//! # Event subscribers for registry observability.
//!
//! This module provides the [`Subscribe`] trait and the synchronous fan-out
//! machinery that delivers committed-mutation events to user code.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Registry ── commit ──► emit(Event) ──► SubscriberSet
//!                                              │ (in order, same thread)
//!                                         ┌────┴────┬─────────┐
//!                                         ▼         ▼         ▼
//!                                     LogWriter  Metrics   Custom ...
//! ```
//!
//! ## Rules
//! - Delivery is synchronous and in commit order; handlers must be quick.
//! - Panics are caught per subscriber and reported to the rest of the set
//!   as `SubscriberPanicked` events; the registry operation is unaffected.
//! - The set is fixed when the registry is built.

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
