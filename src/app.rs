// app.rs

//! # Application Constants
//!
//! Name, version and CLI defaults shared by `main.rs` and the commands.

pub const APP_NAME: &str = "mailframe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_AUTHOR: &str = "Mailframe Contributors";
pub const APP_DESCRIPTION: &str =
    "Render JSON email templates to HTML, with {{variable|fallback}} detection and substitution";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Template path that means "read from stdin".
pub const STDIN_PATH: &str = "-";
