// template/context.rs

//! # Template Context Module
//!
//! Provides the value types fed to the resolver and the session-scoped store
//! of test values used while a template is being edited.
//!
//! A [`PreviewSession`] belongs to one editing session and is passed explicitly
//! to every preview render; it is never shared process-wide.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::template::scanner::VariableToken;
use crate::template::{json_type_name, TemplateError, TemplateResult};

/// A single test or runtime value for a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl VariableValue {
    /// Converts a JSON scalar. `null` means "not supplied" and yields `None`;
    /// arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => {
                debug!("Flattening {} variable value to JSON text", json_type_name(value));
                Some(Self::Text(value.to_string()))
            }
        }
    }

    /// Parses a literal typed on the command line: `true`/`false` become
    /// booleans, numeric literals become numbers, anything else stays text.
    pub fn parse_literal(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Number(i.into());
        }
        if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Self::Number(n);
        }
        Self::Text(raw.to_string())
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Bool(b) => write!(f, "{}", b),
            VariableValue::Number(n) => write!(f, "{}", n),
            VariableValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Mapping from variable name to value, supplied per render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableValues {
    values: BTreeMap<String, VariableValue>,
}

impl VariableValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a value map from a JSON object, skipping `null` entries.
    ///
    /// # Errors
    /// Returns `TemplateError::InvalidVariables` when `value` is not an object.
    pub fn from_json(value: &Value) -> TemplateResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            TemplateError::InvalidVariables(format!(
                "expected a JSON object of variable values, found {}",
                json_type_name(value)
            ))
        })?;

        let mut values = Self::new();
        for (name, raw) in map {
            match VariableValue::from_json(raw) {
                Some(v) => values.insert(name.trim(), v),
                None => debug!("Skipping null value for variable [{}]", name),
            }
        }
        Ok(values)
    }

    /// Sets a value, replacing any existing one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<VariableValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariableValue)> {
        self.values.iter()
    }

    /// Merges `other` into this map; values from `other` win.
    pub fn merge(&mut self, other: &VariableValues) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

/// Test values for one template editing session.
///
/// Replaces the editor's global "currently typed values" cache: the session is
/// created when editing starts, updated as values are typed, and handed to
/// each preview render.
#[derive(Default, Debug, Clone)]
pub struct PreviewSession {
    values: VariableValues,
}

impl PreviewSession {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with initial values.
    pub fn with_values(values: VariableValues) -> Self {
        Self { values }
    }

    /// Sets a test value. An existing value is replaced.
    pub fn set_value(&mut self, name: &str, value: impl Into<VariableValue>) {
        self.values.insert(name.trim(), value);
    }

    /// Clears a test value, so the token falls back again.
    pub fn remove_value(&mut self, name: &str) -> Option<VariableValue> {
        self.values.remove(name)
    }

    pub fn get_value(&self, name: &str) -> Option<&VariableValue> {
        self.values.get(name)
    }

    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains(name)
    }

    /// Values to hand to the resolver.
    pub fn values(&self) -> &VariableValues {
        &self.values
    }

    /// Merges another session into this one. Values from `other` win.
    pub fn merge(&mut self, other: &PreviewSession) {
        self.values.merge(&other.values);
    }

    /// Returns a new session with `other` merged in, leaving both inputs untouched.
    pub fn merged_with(&self, other: &PreviewSession) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Adds built-in values (`current_date`, `current_year`, `current_time`,
    /// `message_id`) without overriding values the user already typed.
    pub fn add_built_ins(&mut self, now: DateTime<Utc>) {
        let built_ins = [
            ("current_date", now.format("%Y-%m-%d").to_string()),
            ("current_year", now.year().to_string()),
            ("current_time", now.format("%H:%M:%S").to_string()),
            ("message_id", uuid::Uuid::new_v4().to_string()),
        ];
        for (name, value) in built_ins {
            if !self.values.contains(name) {
                self.values.insert(name, value);
            }
        }
    }

    /// Gives every detected variable without a value a synthetic example value:
    /// its fallback when declared, otherwise a sample derived from its name.
    ///
    /// Returns how many values were added.
    pub fn fill_samples(&mut self, tokens: &[VariableToken]) -> usize {
        let mut added = 0;
        for token in tokens {
            if self.values.contains(&token.name) {
                continue;
            }
            let sample = token
                .fallback
                .clone()
                .unwrap_or_else(|| sample_value(&token.name));
            debug!("Sample value for [{}]: {}", token.name, sample);
            self.values.insert(token.name.clone(), sample);
            added += 1;
        }
        added
    }
}

/// A deterministic example value for a variable name.
pub fn sample_value(name: &str) -> String {
    let lower = name.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has(&["email"]) {
        "alex.morgan@example.com".to_string()
    } else if has(&["url", "link", "href"]) {
        "https://example.com".to_string()
    } else if has(&["phone"]) {
        "+1 555 0100".to_string()
    } else if has(&["date", "expires", "deadline"]) {
        "2025-01-15".to_string()
    } else if has(&["amount", "price", "total", "balance", "cost"]) {
        "49.99".to_string()
    } else if has(&["count", "quantity", "qty", "days", "number"]) {
        "3".to_string()
    } else if has(&["code", "otp", "token", "pin"]) {
        "123456".to_string()
    } else if has(&["company", "org", "team"]) {
        "Acme Inc.".to_string()
    } else if has(&["last_name", "lastname", "surname"]) {
        "Morgan".to_string()
    } else if has(&["name", "user"]) {
        "Alex".to_string()
    } else {
        format!("[{}]", title_case(name))
    }
}

fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
