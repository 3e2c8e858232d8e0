//! # Request Proxy
//!
//! Routes `(domain, action, id?, input)` requests to the data clients after checking that
//! the domain's bound module is enabled in the current registry snapshot.
//!
//! - [`Dispatcher`] - the entry point; always answers with an [`Envelope`]
//! - [`Domain`] and the per-domain action enums - exact-name action lookup
//! - [`DispatchError`] - failures, converted into error envelopes

pub mod actions;
pub mod dispatcher;
pub mod envelope;
pub mod error;

pub use actions::{Domain, OrderAction, ProductAction, UserAction};
pub use dispatcher::{DataClients, Dispatcher};
pub use envelope::Envelope;
pub use error::DispatchError;
