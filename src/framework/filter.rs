//! # Record Filters
//!
//! A filter maps a field name to either an exact value or a range/set spec
//! (`{min?, max?, in?}`). A record passes when it satisfies every key, and within a key
//! every sub-condition that is present.
//!
//! ## Coercion
//!
//! Fixture data is loosely typed, so comparisons follow one rule: when both operands are
//! numeric (a JSON number, or a string that parses as a number) they compare as `f64`;
//! otherwise their string forms are compared. A missing or `null` field fails the filter.

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Condition applied to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Exact(Value),
    Range {
        min: Option<Value>,
        max: Option<Value>,
        within: Option<Vec<Value>>,
    },
}

impl FilterSpec {
    fn unbounded() -> Self {
        FilterSpec::Range {
            min: None,
            max: None,
            within: None,
        }
    }

    /// Parses the wire form: an object carrying `min`, `max` or `in` is a range/set spec,
    /// anything else is an exact match.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return FilterSpec::Exact(value.clone());
        };
        if !["min", "max", "in"].iter().any(|key| obj.contains_key(*key)) {
            return FilterSpec::Exact(value.clone());
        }

        let bound = |key: &str| obj.get(key).filter(|v| !v.is_null()).cloned();
        let within = match obj.get("in") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items.clone()),
            Some(single) => Some(vec![single.clone()]),
        };

        FilterSpec::Range {
            min: bound("min"),
            max: bound("max"),
            within,
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FilterSpec::Exact(expected) => loosely_equal(value, expected),
            FilterSpec::Range { min, max, within } => {
                if let Some(min) = min {
                    if !matches!(compare(value, min), Some(Ordering::Greater | Ordering::Equal)) {
                        return false;
                    }
                }
                if let Some(max) = max {
                    if !matches!(compare(value, max), Some(Ordering::Less | Ordering::Equal)) {
                        return false;
                    }
                }
                if let Some(within) = within {
                    if !within.iter().any(|candidate| loosely_equal(value, candidate)) {
                        return false;
                    }
                }
                true
            }
        }
    }
}

/// Conjunction of per-field conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(BTreeMap<String, FilterSpec>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds filters from a JSON object, one entry per key.
    pub fn from_json(map: &Map<String, Value>) -> Self {
        Self(
            map.iter()
                .map(|(field, value)| (field.clone(), FilterSpec::from_json(value)))
                .collect(),
        )
    }

    pub fn exact(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0
            .insert(field.to_string(), FilterSpec::Exact(value.into()));
        self
    }

    pub fn min(mut self, field: &str, value: impl Into<Value>) -> Self {
        if let FilterSpec::Range { min, .. } = self.range_entry(field) {
            *min = Some(value.into());
        }
        self
    }

    pub fn max(mut self, field: &str, value: impl Into<Value>) -> Self {
        if let FilterSpec::Range { max, .. } = self.range_entry(field) {
            *max = Some(value.into());
        }
        self
    }

    pub fn within(mut self, field: &str, values: Vec<Value>) -> Self {
        if let FilterSpec::Range { within, .. } = self.range_entry(field) {
            *within = Some(values);
        }
        self
    }

    fn range_entry(&mut self, field: &str) -> &mut FilterSpec {
        let spec = self
            .0
            .entry(field.to_string())
            .or_insert_with(FilterSpec::unbounded);
        if matches!(spec, FilterSpec::Exact(_)) {
            *spec = FilterSpec::unbounded();
        }
        spec
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn matches(&self, attributes: &Map<String, Value>) -> bool {
        self.0.iter().all(|(field, spec)| {
            match attributes.get(field).filter(|v| !v.is_null()) {
                Some(value) => spec.matches(value),
                None => false,
            }
        })
    }
}

pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Orders two loosely typed values. `None` only for incomparable numbers (NaN).
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (numeric(left), numeric(right)) {
        (Some(l), Some(r)) => l.partial_cmp(&r),
        _ => Some(text(left).cmp(&text(right))),
    }
}

pub fn loosely_equal(left: &Value, right: &Value) -> bool {
    compare(left, right) == Some(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_numeric_strings_compare_as_numbers() {
        assert!(loosely_equal(&json!(7), &json!("7")));
        assert!(loosely_equal(&json!("7.0"), &json!(7)));
        assert_eq!(compare(&json!("10"), &json!(9)), Some(Ordering::Greater));
    }

    #[test]
    fn test_non_numeric_falls_back_to_string_comparison() {
        assert!(loosely_equal(&json!("active"), &json!("active")));
        assert!(!loosely_equal(&json!("active"), &json!("Active")));
        assert!(loosely_equal(&json!(true), &json!("true")));
        assert_eq!(compare(&json!("abc"), &json!(5)), Some(Ordering::Greater));
    }

    #[test]
    fn test_min_bound_excludes_lower_values() {
        let filters = Filters::new().min("price", 100);
        assert!(!filters.matches(&attrs(json!({"price": 99}))));
        assert!(filters.matches(&attrs(json!({"price": 100}))));
        assert!(filters.matches(&attrs(json!({"price": "150"}))));
    }

    #[test]
    fn test_min_and_max_intersect() {
        let filters = Filters::new().min("price", 100).max("price", 200);
        assert!(!filters.matches(&attrs(json!({"price": 50}))));
        assert!(filters.matches(&attrs(json!({"price": 150}))));
        assert!(!filters.matches(&attrs(json!({"price": 250}))));
    }

    #[test]
    fn test_set_and_range_on_same_key_are_anded() {
        let filters = Filters::new()
            .within("stock", vec![json!(5), json!(100)])
            .min("stock", 10);
        assert!(!filters.matches(&attrs(json!({"stock": 5}))));
        assert!(filters.matches(&attrs(json!({"stock": 100}))));
        assert!(!filters.matches(&attrs(json!({"stock": 50}))));
    }

    #[test]
    fn test_every_key_must_match() {
        let filters = Filters::new()
            .exact("status", "active")
            .exact("category", "phone");
        assert!(filters.matches(&attrs(json!({"status": "active", "category": "phone"}))));
        assert!(!filters.matches(&attrs(json!({"status": "active", "category": "laptop"}))));
    }

    #[test]
    fn test_missing_or_null_field_fails() {
        let filters = Filters::new().exact("status", "active");
        assert!(!filters.matches(&attrs(json!({"name": "x"}))));
        assert!(!filters.matches(&attrs(json!({"status": null}))));
        let ranged = Filters::new().max("stock", 10);
        assert!(!ranged.matches(&attrs(json!({}))));
    }

    #[test]
    fn test_from_json_distinguishes_exact_and_range() {
        let filters = Filters::from_json(&attrs(json!({
            "status": "active",
            "price": {"min": 100, "max": null},
            "brand": {"in": ["Apple", "Huawei"]},
        })));
        assert_eq!(filters.len(), 3);
        assert!(filters.matches(&attrs(json!({"status": "active", "price": 120, "brand": "Apple"}))));
        assert!(!filters.matches(&attrs(json!({"status": "active", "price": 120, "brand": "Xiaomi"}))));
    }
}
