//! Registry events: classification and payload metadata.
//!
//! This module holds the event **data model** for everything the registry
//! reports to subscribers: committed CRUD mutations, lifecycle transitions,
//! and subscriber faults.
//!
//! ## Quick reference
//! - **Publisher**: [`Registry`](crate::Registry), after each successful
//!   commit and around each lifecycle side effect.
//! - **Consumers**: the registry's [`SubscriberSet`](crate::SubscriberSet),
//!   synchronously, in commit order.

mod event;

pub use event::{Event, EventKind};
