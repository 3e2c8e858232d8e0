//! # Module Hub
//!
//! > **Independently developed modules behind one HTTP proxy.**
//!
//! Three modules (user, product and order management) live in their own directories
//! with a descriptor and a routes file. The hub discovers them, activates the enabled
//! ones, and serves their data through a single dispatcher that answers every request
//! with the same response envelope.
//!
//! ## Request Flow
//!
//! ```text
//! HTTP ─► web ─► proxy::Dispatcher ─► registry snapshot (enabled?)
//!                        │
//!                        └─► clients ─► framework::DataFacade ─► fixtures | provider
//! ```
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic [`DataFacade<T>`](framework::DataFacade) over any [`Record`](framework::Record):
//! mock fixtures or an injected [`DataProvider`](framework::DataProvider), chosen once at
//! startup from `IS_MOCK`.
//!
//! ### 2. The Registry ([`registry`])
//! Scans module directories and publishes an immutable
//! [`RegistrySnapshot`](registry::RegistrySnapshot). Reloads are serialised through the
//! [`RegistryActor`](registry::RegistryActor); reads never block.
//!
//! ### 3. The Interface ([`clients`], [`proxy`], [`web`])
//! Domain clients wrap the facade; the [`Dispatcher`](proxy::Dispatcher) maps
//! `(domain, action, id)` onto them; [`web`] exposes it all over axum.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`HubSystem`](lifecycle::HubSystem) wires everything together from a
//! [`HubConfig`](config::HubConfig).
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info IS_MOCK=1 cargo run
//! curl localhost:9501/api/proxy/order/pay/7 -X POST
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod proxy;
pub mod registry;
pub mod web;
