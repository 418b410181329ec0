// template/lenient.rs

//! # Lenient Field Decoding
//!
//! Serde helpers used by [`crate::template::structure`] so that a single
//! malformed field degrades to "absent" instead of failing the whole template.
//! Editor snapshots are loosely typed: numbers arrive as strings, strings as
//! numbers, and half-filled rows show up in lists.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes any `T`, falling back to `T::default()` when the value has the wrong shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        debug!("Ignoring malformed field: {}", e);
        T::default()
    }))
}

/// Decodes an optional string, accepting numbers and booleans as text.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

/// Decodes an optional number, accepting numeric strings such as `"80"` or `" 12.5 "`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

/// Decodes an optional boolean, accepting `"true"`/`"false"` and `0`/`1`.
pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Decodes a sequence, keeping the elements that decode and dropping the rest.
///
/// A non-array value decodes as an empty sequence.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            debug!("Expected a list, found {}", crate::template::json_type_name(&other));
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!("Dropping malformed list entry: {}", e);
                None
            }
        })
        .collect())
}

/// Decodes a sequence of strings, converting scalar entries to text.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
        // A single paragraph typed straight into the field
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

pub(crate) fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "number")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "boolean")]
        enabled: Option<bool>,
        #[serde(default, deserialize_with = "strings")]
        lines: Vec<String>,
    }

    #[test]
    fn test_string_accepts_scalars() {
        let probe: Probe = serde_json::from_value(json!({ "label": 42 })).unwrap();
        assert_eq!(probe.label.as_deref(), Some("42"));

        let probe: Probe = serde_json::from_value(json!({ "label": { "nested": true } })).unwrap();
        assert_eq!(probe.label, None);
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let probe: Probe = serde_json::from_value(json!({ "amount": " 80 " })).unwrap();
        assert_eq!(probe.amount, Some(80.0));

        let probe: Probe = serde_json::from_value(json!({ "amount": "eighty" })).unwrap();
        assert_eq!(probe.amount, None);
    }

    #[test]
    fn test_boolean_accepts_strings() {
        let probe: Probe = serde_json::from_value(json!({ "enabled": "false" })).unwrap();
        assert_eq!(probe.enabled, Some(false));
    }

    #[test]
    fn test_strings_wraps_single_value() {
        let probe: Probe = serde_json::from_value(json!({ "lines": "only one" })).unwrap();
        assert_eq!(probe.lines, vec!["only one".to_string()]);

        let probe: Probe = serde_json::from_value(json!({ "lines": ["a", 2, null, "b"] })).unwrap();
        assert_eq!(probe.lines, vec!["a", "2", "b"]);
    }
}
