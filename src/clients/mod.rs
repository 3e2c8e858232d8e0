//! Domain-specific wrappers around [`DataFacade`](crate::framework::DataFacade).

pub mod data_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use data_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
