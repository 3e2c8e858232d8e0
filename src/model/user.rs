use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::framework::{lenient, Record, RecordId};

/// Represents a registered user in the fixture set.
///
/// # Data Framework
/// This struct implements the [`Record`] trait, allowing it to be served by a
/// [`DataFacade`](crate::framework::DataFacade). Keyword search looks at `name` and
/// `email`.
///
/// Attributes the fixture carries beyond the typed fields are kept in `extra` so they
/// remain filterable and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Record id
    /// * `name` - User's display name
    /// * `email` - User's email address
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            status: None,
            extra: Map::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const ENTITY: &'static str = "user";
    const SEARCH_FIELDS: [&'static str; 2] = ["name", "email"];

    fn id(&self) -> RecordId {
        self.id
    }
}
