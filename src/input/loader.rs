// input/loader.rs

//! # Document Loader
//!
//! Reads template and variable documents. Files ending in `.yaml` or `.yml`
//! are parsed as YAML, everything else as JSON. Stdin (`-`) is tried as JSON
//! first and then as YAML.

use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::app::STDIN_PATH;
use crate::error::{AppError, AppResult};
use crate::template::VariableValues;

/// Source document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// JSON, falling back to YAML
    Detect,
}

impl DocumentFormat {
    pub fn from_path(path: &str) -> Self {
        if path == STDIN_PATH {
            return DocumentFormat::Detect;
        }
        match Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Reads a file, or stdin for `-`.
pub fn read_source(path: &str) -> AppResult<String> {
    if path == STDIN_PATH {
        debug!("Reading document from stdin");
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::io("<stdin>", e))?;
        return Ok(text);
    }
    debug!("Reading document from: {}", path);
    fs::read_to_string(path).map_err(|e| AppError::io(path, e))
}

/// Parses document text into a JSON value.
pub fn parse_document(text: &str, format: DocumentFormat) -> AppResult<Value> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
        DocumentFormat::Detect => match serde_json::from_str(text) {
            Ok(value) => Ok(value),
            Err(json_err) => {
                debug!("Input is not JSON ({}), trying YAML", json_err);
                serde_yaml::from_str(text).map_err(|_| AppError::Json(json_err))
            }
        },
    }
}

/// Loads a raw template document. Structural checks happen at render time.
pub fn load_template(path: &str) -> AppResult<Value> {
    let text = read_source(path)?;
    parse_document(&text, DocumentFormat::from_path(path))
}

/// Loads a JSON or YAML object of variable values.
pub fn load_variables_file(path: &str) -> AppResult<VariableValues> {
    let value = load_template(path)?;
    Ok(VariableValues::from_json(&value)?)
}
