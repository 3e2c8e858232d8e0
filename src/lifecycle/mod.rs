//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`HubSystem`] - wires the registry actor, data clients and dispatcher together
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod hub_system;
pub mod tracing;

pub use self::hub_system::HubSystem;
pub use self::tracing::setup_tracing;
