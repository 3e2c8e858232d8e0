use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::framework::{lenient, Record, RecordId};

/// Represents a customer order in the fixture set.
///
/// # Data Framework
/// This struct implements the [`Record`] trait, allowing it to be served by a
/// [`DataFacade`](crate::framework::DataFacade).
///
/// `user_id` and `product_id` are not checked against the user and product sets; a
/// reference that is not a valid id is kept as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<RecordId>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(default = "default_status", deserialize_with = "status")]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_status() -> String {
    "pending".to_string()
}

fn status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_text(deserializer)?.unwrap_or_else(default_status))
}

impl Order {
    /// Creates a new Order instance.
    ///
    /// # Notes
    /// The order is initialized with status "pending".
    pub fn new(
        id: impl Into<RecordId>,
        user_id: impl Into<RecordId>,
        product_id: impl Into<RecordId>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            order_no: None,
            user_id: Some(user_id.into()),
            product_id: Some(product_id.into()),
            amount,
            status: default_status(),
            extra: Map::new(),
        }
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";
    const ENTITY: &'static str = "order";
    const SEARCH_FIELDS: [&'static str; 2] = ["order_no", "status"];

    fn id(&self) -> RecordId {
        self.id
    }
}
