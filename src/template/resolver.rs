// template/resolver.rs

//! # Variable Resolver Module
//!
//! Substitutes `{{name|fallback}}` tokens in every string leaf of a template.
//! Each token resolves to, in order:
//!
//! 1. the supplied value for `name`,
//! 2. the token's own fallback text,
//! 3. the [`MissingPolicy`]: the original token text (`Keep`) or nothing (`Blank`).
//!
//! Resolution never fails and never mutates its input. Supplied values are
//! inserted literally; braces inside them are broken up so a value cannot
//! introduce a new token. When an inserted value would still close a token
//! together with braces in the surrounding text, those braces are separated
//! too, so the only tokens left in the output are the ones kept verbatim.
//! Resolving the output again changes nothing.

use std::borrow::Cow;
use std::str::FromStr;

use log::debug;
use regex::Captures;
use serde_json::Value;

use crate::template::context::VariableValues;
use crate::template::scanner::{VariableToken, TOKEN_PATTERN};
use crate::template::structure::TemplateStructure;
use crate::template::TemplateResult;

/// What to emit for a token with neither a value nor a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Leave the token text as written, e.g. `{{order_id}}`
    #[default]
    Keep,
    /// Replace the token with an empty string
    Blank,
}

impl FromStr for MissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(MissingPolicy::Keep),
            "blank" | "empty" => Ok(MissingPolicy::Blank),
            _ => Err(format!("Unknown missing-variable policy: {}", s)),
        }
    }
}

/// Resolves tokens against one set of values.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    values: &'a VariableValues,
    policy: MissingPolicy,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver that keeps unresolved tokens verbatim.
    pub fn new(values: &'a VariableValues) -> Self {
        Self {
            values,
            policy: MissingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MissingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves every token in a single string.
    pub fn resolve_str(&self, text: &str) -> String {
        self.resolve_cow(text).into_owned()
    }

    /// Returns a copy of `value` with all string leaves resolved.
    pub fn resolve_value(&self, value: &Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.resolve_str(text)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.resolve_value(v)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.resolve_value(v)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }

    /// Returns a copy of a typed structure with all string fields resolved.
    pub fn resolve_structure(&self, structure: &TemplateStructure) -> TemplateResult<TemplateStructure> {
        let resolved = self.resolve_value(&structure.to_value()?);
        TemplateStructure::from_value(&resolved)
    }

    fn resolve_cow<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text.contains("{{") {
            return Cow::Borrowed(text);
        }

        let pieces = self.pieces(text);
        let joined: String = pieces.iter().map(Piece::as_str).collect();
        let kept = pieces.iter().filter_map(|piece| match piece {
            Piece::Kept(token) => Some(*token),
            _ => None,
        });
        if TOKEN_PATTERN.find_iter(&joined).map(|m| m.as_str()).eq(kept) {
            return Cow::Owned(joined);
        }

        debug!("Inserted text formed a token with surrounding braces; separating them");
        Cow::Owned(join_separated(&pieces))
    }

    /// Splits `text` into literal runs and token replacements.
    fn pieces<'t>(&self, text: &'t str) -> Vec<Piece<'t>> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in TOKEN_PATTERN.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                pieces.push(Piece::Text(&text[last..whole.start()]));
            }
            pieces.push(self.replacement(&caps, whole.as_str()));
            last = whole.end();
        }
        if last < text.len() {
            pieces.push(Piece::Text(&text[last..]));
        }
        pieces
    }

    fn replacement<'t>(&self, caps: &Captures<'_>, original: &'t str) -> Piece<'t> {
        let Some(token) = VariableToken::from_captures(caps) else {
            return Piece::Kept(original);
        };

        if let Some(value) = self.values.get(&token.name) {
            return Piece::Inserted(separate_braces(&value.to_string()).into_owned());
        }
        if let Some(fallback) = token.fallback {
            return Piece::Inserted(fallback);
        }

        debug!("No value or fallback for variable [{}]", token.name);
        match self.policy {
            MissingPolicy::Keep => Piece::Kept(original),
            MissingPolicy::Blank => Piece::Inserted(String::new()),
        }
    }
}

/// One run of resolver output.
enum Piece<'t> {
    /// Template text between tokens
    Text(&'t str),
    /// A value, fallback or blank
    Inserted(String),
    /// A token left exactly as written
    Kept(&'t str),
}

impl Piece<'_> {
    fn as_str(&self) -> &str {
        match self {
            Piece::Text(text) | Piece::Kept(text) => *text,
            Piece::Inserted(text) => text.as_str(),
        }
    }
}

/// Puts a space between adjacent identical braces, so the text holds no
/// `{{` or `}}`.
fn separate_braces(text: &str) -> Cow<'_, str> {
    if !text.contains("{{") && !text.contains("}}") {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev = None;
    for c in text.chars() {
        if (c == '{' || c == '}') && prev == Some(c) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    Cow::Owned(out)
}

/// Joins pieces so that the only `{{`/`}}` left belong to kept tokens.
fn join_separated(pieces: &[Piece<'_>]) -> String {
    let mut out = String::new();
    for piece in pieces {
        let text = match piece {
            Piece::Kept(token) => Cow::Borrowed(*token),
            Piece::Text(text) => separate_braces(text),
            Piece::Inserted(text) => separate_braces(text),
        };
        if let (Some(prev), Some(next)) = (out.chars().last(), text.chars().next()) {
            if (prev == '{' || prev == '}') && prev == next {
                out.push(' ');
            }
        }
        out.push_str(&text);
    }
    out
}
