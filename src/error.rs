// error.rs

//! # Error Handling Module
//!
//! Application-level errors for the CLI. Engine failures arrive as
//! [`TemplateError`] and are wrapped here alongside file and argument problems.
//!
//! # Usage Example
//! ```rust
//! use mailframe::error::AppError;
//!
//! fn example_function() -> Result<(), AppError> {
//!     Err(AppError::InvalidArgument("--now must be an ISO date".to_string()))
//! }
//! ```

use std::path::PathBuf;

use crate::template::TemplateError;

// ============================
// Application Error Definitions
// ============================

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A file could not be read or written.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A flag value that could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for CLI operation results
pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_is_transparent() {
        let err: AppError = TemplateError::InvalidStructure("expected object".to_string()).into();
        assert_eq!(err.to_string(), "Invalid template structure: expected object");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = AppError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "IO error on missing.json: not found");
    }
}
