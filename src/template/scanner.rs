// template/scanner.rs

//! # Variable Scanner Module
//!
//! Finds `{{name}}` and `{{name|fallback}}` tokens anywhere inside a JSON value.
//! The editor uses the result to populate its "detected variables" panel, and
//! the CLI uses it to report which variables a render left unresolved.
//!
//! Whitespace inside the braces is ignored (`{{ first_name | there }}`), and an
//! unclosed `{{` is plain text rather than an error.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use crate::template::context::VariableValues;

/// Matches a single token. Group 1 is the name, group 2 the optional fallback.
pub(crate) static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([^{}|]*)(?:\|([^{}]*))?\}\}").expect("token pattern is valid")
});

/// A variable referenced by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableToken {
    /// Trimmed variable name
    pub name: String,
    /// Trimmed fallback text, if one was declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl VariableToken {
    /// Builds a token from a regex match, or `None` when the name is blank.
    pub(crate) fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let name = caps.get(1)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        let fallback = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        Some(Self {
            name: name.to_string(),
            fallback,
        })
    }
}

/// Scans a JSON value and returns every distinct variable it references.
///
/// Objects are visited in property order and arrays in index order. Each name
/// appears once, at the position of its first occurrence. When the same name
/// is declared with different fallbacks, the first declared fallback wins.
pub fn scan(value: &Value) -> Vec<VariableToken> {
    let mut tokens = Vec::new();
    visit(value, &mut |token| merge(&mut tokens, token));
    tokens
}

/// Scans a single string. Duplicates are collapsed the same way as [`scan`].
pub fn scan_str(text: &str) -> Vec<VariableToken> {
    let mut tokens = Vec::new();
    visit_str(text, &mut |token| merge(&mut tokens, token));
    tokens
}

/// Returns the variables with at least one occurrence that has neither a
/// supplied value nor a fallback.
///
/// Occurrences are checked one by one, so `{{name|Friend}}` elsewhere in the
/// template does not hide a bare `{{name}}`. Each name is listed once, in
/// order of its first unresolved occurrence.
pub fn unresolved(value: &Value, values: &VariableValues) -> Vec<VariableToken> {
    let mut missing: Vec<VariableToken> = Vec::new();
    visit(value, &mut |token| {
        if token.fallback.is_some() || values.contains(&token.name) {
            return;
        }
        if !missing.iter().any(|existing| existing.name == token.name) {
            missing.push(token);
        }
    });
    missing
}

fn visit(value: &Value, found: &mut impl FnMut(VariableToken)) {
    match value {
        Value::String(text) => visit_str(text, found),
        Value::Array(items) => {
            for item in items {
                visit(item, found);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                visit(item, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn visit_str(text: &str, found: &mut impl FnMut(VariableToken)) {
    for caps in TOKEN_PATTERN.captures_iter(text) {
        if let Some(token) = VariableToken::from_captures(&caps) {
            found(token);
        }
    }
}

fn merge(tokens: &mut Vec<VariableToken>, token: VariableToken) {
    match tokens.iter_mut().find(|existing| existing.name == token.name) {
        Some(existing) => {
            if existing.fallback.is_none() {
                existing.fallback = token.fallback;
            }
        }
        None => tokens.push(token),
    }
}

/// Unit tests for scanner functionality.
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token(name: &str, fallback: Option<&str>) -> VariableToken {
        VariableToken {
            name: name.to_string(),
            fallback: fallback.map(str::to_string),
        }
    }

    #[test]
    fn test_scan_plain_and_fallback_tokens() {
        let tokens = scan_str("Hello {{name|Friend}}, your order {{ order_id }} shipped");
        assert_eq!(
            tokens,
            vec![token("name", Some("Friend")), token("order_id", None)]
        );
    }

    #[test]
    fn test_scan_trims_whitespace() {
        let tokens = scan_str("{{  first_name  |  there  }}");
        assert_eq!(tokens, vec![token("first_name", Some("there"))]);
    }

    #[test]
    fn test_scan_nested_structure_in_document_order() {
        let value = json!({
            "title": { "text": "Hi {{name}}" },
            "body": { "paragraphs": ["Plan: {{plan|Free}}", "Renews {{renewal_date}}"] },
            "visual": { "type": "progress", "progressBars": [{ "current": 3, "label": "{{metric}}" }] },
            "flag": true,
            "nothing": null
        });

        let names: Vec<String> = scan(&value).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["name", "plan", "renewal_date", "metric"]);
    }

    #[test]
    fn test_scan_deduplicates_first_fallback_wins() {
        let value = json!([
            "{{name|Friend}}",
            "{{name|Customer}}",
            "{{ name }}"
        ]);
        assert_eq!(scan(&value), vec![token("name", Some("Friend"))]);
    }

    #[test]
    fn test_scan_fills_fallback_from_later_occurrence() {
        let value = json!(["Dear {{name}}", "Bye {{name|Friend}}", "{{name|Pal}}"]);
        assert_eq!(scan(&value), vec![token("name", Some("Friend"))]);
    }

    #[test]
    fn test_scan_ignores_malformed_tokens() {
        assert!(scan_str("Hello {{name").is_empty());
        assert!(scan_str("{{ }} and {{|fallback}}").is_empty());
        assert!(scan_str("single {brace} only").is_empty());
    }

    #[test]
    fn test_scan_empty_fallback_is_no_fallback() {
        assert_eq!(scan_str("{{code|}}"), vec![token("code", None)]);
    }

    #[test]
    fn test_scan_non_string_leaves() {
        assert!(scan(&json!(42)).is_empty());
        assert!(scan(&json!({ "a": [1, false, null] })).is_empty());
    }

    #[test]
    fn test_unresolved_excludes_values_and_fallbacks() {
        let value = json!({ "text": "{{a}} {{b|B}} {{c}}" });
        let mut values = VariableValues::new();
        values.insert("a", "Ada");

        let missing = unresolved(&value, &values);
        assert_eq!(missing, vec![token("c", None)]);
    }

    #[test]
    fn test_unresolved_checks_each_occurrence() {
        let value = json!({
            "title": { "text": "Hi {{name|Friend}}" },
            "body": { "paragraphs": ["Bye {{name}}", "{{plan|Free}} {{ name }}"] }
        });

        let missing = unresolved(&value, &VariableValues::new());
        assert_eq!(missing, vec![token("name", None)]);

        let mut values = VariableValues::new();
        values.insert("name", "Ada");
        assert!(unresolved(&value, &values).is_empty());
    }
}
