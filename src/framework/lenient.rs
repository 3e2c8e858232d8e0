//! Loosely typed field decoding for fixture records.
//!
//! Fixture files are hand-written and disagree on whether `price` is `5999` or `"5999"`,
//! or whether `status` is `"active"` or `1`. These helpers are used with
//! `#[serde(deserialize_with = ...)]` so that only the record id can disqualify a row.
//! Numbers follow the same rule as [`filter`](crate::framework::filter): a JSON number or a
//! string that parses as one. Anything else falls back to the field's empty value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::framework::filter::numeric;
use crate::framework::RecordId;

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// `f64` from a number or numeric string; `0.0` otherwise.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(numeric(&value).unwrap_or(0.0))
}

/// `i64` from a number or numeric string, truncated; `0` otherwise.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(numeric(&value).map(|n| n as i64).unwrap_or(0))
}

/// Strings as-is, other scalars by their JSON text, `null` as empty.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(value).unwrap_or_default())
}

pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(value))
}

/// A reference to another record; `None` when it does not normalise.
pub fn optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RecordId>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
