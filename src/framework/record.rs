//! # Record Trait
//!
//! The `Record` trait is the contract every fixture-backed entity (User, Product, Order)
//! implements so that a single [`DataFacade`](crate::framework::DataFacade) can serve all
//! of them. Records are flat attribute bags keyed by an integer [`RecordId`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Debug, Display};
use std::str::FromStr;

use crate::framework::FrameworkError;

/// Normalised record identifier.
///
/// Fixtures and HTTP input disagree on whether ids are numbers or strings. Both forms are
/// folded into a `u64` at ingestion, so `7` and `"7"` name the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = FrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| FrameworkError::InvalidId(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(id) => Ok(Self(id)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Trait that any record type must implement to be served by a `DataFacade`.
///
/// # Associated Constants
/// - `COLLECTION`: key of the record list inside a fixture document (`{"users": [...]}`).
/// - `ENTITY`: singular name used in log fields and "not found" messages.
/// - `SEARCH_FIELDS`: the pair of attributes a keyword search looks at.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
    const ENTITY: &'static str;
    const SEARCH_FIELDS: [&'static str; 2];

    fn id(&self) -> RecordId;

    /// Flat attribute view used by filters and search.
    fn attributes(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Case-insensitive substring match over [`Record::SEARCH_FIELDS`].
    ///
    /// `needle` must already be lowercased.
    fn matches_keyword(&self, needle: &str) -> bool {
        let attributes = self.attributes();
        Self::SEARCH_FIELDS.iter().any(|field| {
            let text = match attributes.get(*field) {
                Some(Value::String(s)) => s.to_lowercase(),
                Some(Value::Null) | None => return false,
                Some(other) => other.to_string().to_lowercase(),
            };
            text.contains(needle)
        })
    }
}
