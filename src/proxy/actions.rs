//! Domain and action names accepted by the dispatcher.
//!
//! Action lookup is by exact name. Unknown names are not errors: they fall through to
//! the module-info handler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::proxy::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    User,
    Product,
    Order,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::User => "user",
            Domain::Product => "product",
            Domain::Order => "order",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Domain::User),
            "product" => Ok(Domain::Product),
            "order" => Ok(Domain::Order),
            other => Err(DispatchError::UnknownDomain(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    List,
    Get,
    Search,
    Create,
    Info,
}

impl UserAction {
    pub fn from_name(name: &str) -> Self {
        match name {
            "users" => UserAction::List,
            "user" => UserAction::Get,
            "search" => UserAction::Search,
            "create-user" | "create" => UserAction::Create,
            _ => UserAction::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    List,
    Get,
    Search,
    CheckStock,
    Create,
    UpdateStock,
    Info,
}

impl ProductAction {
    pub fn from_name(name: &str) -> Self {
        match name {
            "products" => ProductAction::List,
            "product" => ProductAction::Get,
            "search" => ProductAction::Search,
            "check-stock" => ProductAction::CheckStock,
            "create-product" | "create" => ProductAction::Create,
            "update-stock" => ProductAction::UpdateStock,
            _ => ProductAction::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    List,
    Get,
    Create,
    Pay,
    Cancel,
    Info,
}

impl OrderAction {
    pub fn from_name(name: &str) -> Self {
        match name {
            "orders" => OrderAction::List,
            "order" => OrderAction::Get,
            "create-order" | "create" => OrderAction::Create,
            "pay-order" | "pay" => OrderAction::Pay,
            "cancel-order" | "cancel" => OrderAction::Cancel,
            _ => OrderAction::Info,
        }
    }
}
