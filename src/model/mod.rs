//! Record types served by the data facades, each implementing [`Record`](crate::framework::Record).

pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;
