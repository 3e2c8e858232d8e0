use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::framework::{lenient, Record, RecordId};

/// Represents a product in the inventory fixture.
///
/// # Data Framework
/// This struct implements the [`Record`] trait, allowing it to be served by a
/// [`DataFacade`](crate::framework::DataFacade). Keyword search looks at `name` and
/// `brand`; stock checks compare against `stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub brand: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: i64,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Record id
    /// * `name` - Product name
    /// * `price` - Product price
    /// * `stock` - Available stock quantity
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            category: None,
            price,
            stock,
            status: None,
            extra: Map::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn has_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    const ENTITY: &'static str = "product";
    const SEARCH_FIELDS: [&'static str; 2] = ["name", "brand"];

    fn id(&self) -> RecordId {
        self.id
    }
}
