//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic: configuration loading and logging setup, and the
//! composition root that wires adapters into the coordinator.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`bootstrap`] - Composition root for runtime wiring

pub mod bootstrap;
pub mod config;
