// input/env.rs

//! # Variable Value Sources
//!
//! Assembles the values for a render from, in increasing precedence:
//! a `--vars` JSON/YAML file, a `--env-file` dotenv file, and `-e KEY=VALUE`
//! overrides.

use std::path::Path;

use log::debug;

use crate::input::loader::load_variables_file;
use crate::error::{AppError, AppResult};
use crate::template::{VariableValue, VariableValues};

/// Loads and merges every variable source.
///
/// # Arguments
/// * `vars_file` - JSON or YAML object of values
/// * `env_file` - dotenv-style file of `KEY=VALUE` lines
/// * `overrides` - `KEY=VALUE` pairs from `-e` flags
pub fn load_variable_values(
    vars_file: Option<&str>,
    env_file: Option<&str>,
    overrides: &[String],
) -> AppResult<VariableValues> {
    let mut values = VariableValues::new();

    if let Some(path) = vars_file {
        debug!("Loading variable values from: {}", path);
        values.merge(&load_variables_file(path)?);
    }

    if let Some(path) = env_file {
        values.merge(&load_env_file(path)?);
    }

    for override_str in overrides {
        let (key, value) = parse_env_var(override_str).ok_or_else(|| {
            AppError::InvalidArgument(format!(
                "expected KEY=VALUE for -e, got '{}'",
                override_str
            ))
        })?;
        debug!("  Override variable: {}", key);
        values.insert(key, VariableValue::parse_literal(&value));
    }

    debug!("Loaded {} variable value(s)", values.len());
    Ok(values)
}

/// Reads a dotenv file. Values stay text.
pub fn load_env_file(path: &str) -> AppResult<VariableValues> {
    let dotenv_path = Path::new(path);
    if !dotenv_path.exists() {
        return Err(AppError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "env file not found"),
        ));
    }

    debug!("Loading variable values from env file: {}", path);
    let iter = dotenvy::from_path_iter(dotenv_path)
        .map_err(|e| AppError::InvalidArgument(format!("could not read env file {}: {}", path, e)))?;

    let mut values = VariableValues::new();
    for item in iter {
        let (key, value) = item
            .map_err(|e| AppError::InvalidArgument(format!("bad line in env file {}: {}", path, e)))?;
        debug!("  Loaded variable: {}", key);
        values.insert(key, value);
    }
    Ok(values)
}

/// Parse a single KEY=VALUE string. The key is trimmed and must be non-empty.
pub fn parse_env_var(s: &str) -> Option<(String, String)> {
    let (key, value) = s.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some((key.to_string(), value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_env_var() {
        assert_eq!(
            parse_env_var("name=Ada"),
            Some(("name".to_string(), "Ada".to_string()))
        );
        assert_eq!(
            parse_env_var("url=https://x.test/?a=b"),
            Some(("url".to_string(), "https://x.test/?a=b".to_string()))
        );
        assert_eq!(parse_env_var("empty="), Some(("empty".to_string(), String::new())));
        assert_eq!(parse_env_var("novalue"), None);
        assert_eq!(parse_env_var("=orphan"), None);
    }

    #[test]
    fn test_precedence() {
        let vars = temp_file(".json", r#"{ "name": "FromVars", "plan": "Free", "seats": 1 }"#);
        let env = temp_file(".env", "name=FromEnv\nplan=Pro\n");
        let overrides = vec!["plan=Enterprise".to_string(), "vip=true".to_string()];

        let values = load_variable_values(
            vars.path().to_str(),
            env.path().to_str(),
            &overrides,
        )
        .unwrap();

        assert_eq!(values.get("name"), Some(&VariableValue::from("FromEnv")));
        assert_eq!(values.get("plan"), Some(&VariableValue::from("Enterprise")));
        assert_eq!(values.get("vip"), Some(&VariableValue::Bool(true)));
        assert_eq!(values.get("seats").map(|v| v.to_string()), Some("1".to_string()));
    }

    #[test]
    fn test_env_file_values_stay_text() {
        let env = temp_file(".env", "count=3\n");
        let values = load_env_file(env.path().to_str().unwrap()).unwrap();
        assert_eq!(values.get("count"), Some(&VariableValue::from("3")));
    }

    #[test]
    fn test_override_literals() {
        let overrides = vec!["count=3".to_string(), "ratio=0.5".to_string()];
        let values = load_variable_values(None, None, &overrides).unwrap();
        assert!(matches!(values.get("count"), Some(VariableValue::Number(_))));
        assert_eq!(values.get("ratio").map(|v| v.to_string()), Some("0.5".to_string()));
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let err = load_variable_values(None, None, &["oops".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_env_file() {
        let err = load_env_file("/no/such/.env").unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
