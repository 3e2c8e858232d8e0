//! Static JSON fixtures backing mock mode.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::framework::{FrameworkError, Record};

/// In-memory copy of one fixture collection.
///
/// Loading never fails: a missing or unreadable file yields an empty, *unavailable*
/// source. Availability is what `fallback_to_real` keys off.
#[derive(Debug, Clone)]
pub struct FixtureSource<T: Record> {
    records: Vec<T>,
    available: bool,
}

impl<T: Record> FixtureSource<T> {
    /// Reads `path` and extracts the `T::COLLECTION` list.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let entity = T::ENTITY;

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(entity, path = %path.display(), "No fixture file");
                return Self::empty();
            }
            Err(e) => {
                warn!(entity, path = %path.display(), error = %e, "Fixture unreadable");
                return Self::empty();
            }
        };

        match Self::parse(&raw) {
            Ok(records) => {
                info!(entity, path = %path.display(), count = records.len(), "Fixtures loaded");
                Self {
                    records,
                    available: true,
                }
            }
            Err(e) => {
                warn!(entity, path = %path.display(), error = %e, "Fixture malformed");
                Self::empty()
            }
        }
    }

    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            records,
            available: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            available: false,
        }
    }

    /// Parses a fixture document.
    ///
    /// Accepts `{"<collection>": [...]}` or a bare array. A document without the
    /// collection key is an empty collection. Entries that do not deserialize into `T`
    /// (a missing or non-numeric id) are skipped with a warning. Other fields decode
    /// leniently, so `"price": "5999"` or `"status": 1` do not drop a row.
    pub fn parse(raw: &str) -> Result<Vec<T>, FrameworkError> {
        let document: Value = serde_json::from_str(raw)?;
        let items = match document {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove(T::COLLECTION) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let records = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(entity = T::ENTITY, index, error = %e, "Skipping fixture entry");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}
