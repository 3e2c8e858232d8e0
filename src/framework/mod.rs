//! Generic data-access engine shared by every domain.
//!
//! # Main Components
//!
//! - [`Record`] - Trait that fixture-backed record types implement
//! - [`DataFacade`] - Generic facade that resolves mock fixtures or a real provider
//! - [`DataProvider`] - Seam for real data backends ([`NoopProvider`] by default)
//! - [`Filters`] - Exact/range/set filters with an explicit coercion rule
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for a provider with queued expectations, used to test real-mode
//! delegation without a backend.

pub mod error;
pub mod facade;
pub mod filter;
pub mod fixtures;
pub mod lenient;
pub mod mock;
pub mod provider;
pub mod record;

pub use error::FrameworkError;
pub use facade::{DataFacade, DataMode};
pub use filter::{FilterSpec, Filters};
pub use fixtures::FixtureSource;
pub use provider::{DataProvider, NoopProvider};
pub use record::{Record, RecordId};
