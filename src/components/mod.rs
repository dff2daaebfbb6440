//! # Component data model.
//!
//! This module provides the record types managed by the registry:
//! - [`ComponentId`] - opaque unique identifier
//! - [`Component`] - the managed record (config, edges, status, state)
//! - [`ComponentSpec`] - declared shape passed to create/update
//! - [`ConfigValue`] - static or snapshot-derived configuration
//! - [`Lifecycle`] - the start/stop function pair of executable components

mod component;
mod config;
mod lifecycle;
mod spec;

pub use component::{Component, ComponentId, Status};
pub use config::{ConfigValue, DeriveFn, SharedValue};
pub use lifecycle::{Lifecycle, StartFn, StateHandle, StopFn};
pub use spec::ComponentSpec;
