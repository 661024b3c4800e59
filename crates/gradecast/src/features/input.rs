//! Raw, untyped request values keyed by field name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw value as supplied by a form, payload or test.
///
/// Deserializes untagged, so a JSON object like
/// `{"Age": 17, "StudyTimeWeekly": 12.5, "Gender": "0"}` maps directly.
/// Booleans, `null` and nested JSON also deserialize, so a request with a
/// badly typed field still reaches the assembler and is rejected per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// Explicit `null`; treated like an absent field.
    Null,
    Other(serde_json::Value),
}

impl RawValue {
    /// Short description used in type errors.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Int(v) => format!("integer {v}"),
            RawValue::Float(v) => format!("number {v}"),
            RawValue::Text(s) => format!("text {s:?}"),
            RawValue::Bool(v) => format!("boolean {v}"),
            RawValue::Null => "null".to_string(),
            RawValue::Other(v) if v.is_array() => "array".to_string(),
            RawValue::Other(v) if v.is_object() => "object".to_string(),
            RawValue::Other(v) => format!("value {v}"),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Int(v) => write!(f, "{v}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Bool(v) => write!(f, "{v}"),
            RawValue::Null => f.write_str("null"),
            RawValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(v as i64)
    }
}

impl From<u32> for RawValue {
    fn from(v: u32) -> Self {
        RawValue::Int(v as i64)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

/// Named raw inputs for one prediction request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureInput {
    values: BTreeMap<String, RawValue>,
}

impl FeatureInput {
    /// Create an empty input set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Remove a value, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.values.remove(name)
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for FeatureInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_values_untagged() {
        let input: FeatureInput =
            serde_json::from_str(r#"{"Age": 17, "StudyTimeWeekly": 12.5, "Gender": "1"}"#)
                .unwrap();
        assert_eq!(input.get("Age"), Some(&RawValue::Int(17)));
        assert_eq!(input.get("StudyTimeWeekly"), Some(&RawValue::Float(12.5)));
        assert_eq!(input.get("Gender"), Some(&RawValue::Text("1".into())));
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn json_values_of_any_type_deserialize() {
        let input: FeatureInput = serde_json::from_str(
            r#"{"Tutoring": true, "Music": null, "Sports": [1], "Age": {"v": 17}}"#,
        )
        .unwrap();
        assert_eq!(input.get("Tutoring"), Some(&RawValue::Bool(true)));
        assert_eq!(input.get("Music"), Some(&RawValue::Null));
        assert_eq!(input.get("Sports").map(RawValue::describe).as_deref(), Some("array"));
        assert_eq!(input.get("Age").map(RawValue::describe).as_deref(), Some("object"));
    }

    #[test]
    fn builder_replaces() {
        let input = FeatureInput::new().with("Age", 16).with("Age", 17);
        assert_eq!(input.len(), 1);
        assert_eq!(input.get("Age"), Some(&RawValue::Int(17)));
    }

    #[test]
    fn from_iterator() {
        let input: FeatureInput = [("Music", 1), ("Sports", 0)].into_iter().collect();
        let names: Vec<_> = input.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["Music", "Sports"]);
    }
}
