// template/mod.rs

//! # Template Module
//!
//! This module provides the data side of the email engine: the typed template
//! structure, the `{{variable|fallback}}` scanner, the resolver that substitutes
//! test or runtime values, and the session context that holds those values.
//!
//! Nothing in here produces HTML; see [`crate::render`] for that.

pub mod context;
pub mod lenient;
pub mod resolver;
pub mod scanner;
pub mod structure;

pub use context::{PreviewSession, VariableValue, VariableValues};
pub use resolver::{MissingPolicy, Resolver};
pub use scanner::{scan, scan_str, unresolved, VariableToken};
pub use structure::TemplateStructure;

/// Errors surfaced by the template pipeline.
///
/// Only structural problems reach the caller; everything section-local is
/// recovered by defaulting.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid variable values: {0}")]
    InvalidVariables(String),

    #[error("Template decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Type alias for template operation results
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Returns a short name for the JSON type of `value`, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
