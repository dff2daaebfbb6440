//! Registry core: storage, snapshots, and the public facade.
//!
//! Internal modules:
//! - [`store`]: RCU cell holding the insertion-ordered component map;
//! - [`snapshot`]: immutable point-in-time read view;
//! - [`registry`]: the facade exposing CRUD, queries, and lifecycle calls;
//! - [`builder`]: subscriber/namespace configuration and declarative build.

mod builder;
mod registry;
mod snapshot;
pub(crate) mod store;

pub use builder::{DEFAULT_NAMESPACE, RegistryBuilder};
pub use registry::Registry;
pub use snapshot::Snapshot;
