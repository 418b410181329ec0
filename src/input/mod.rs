// input/mod.rs

//! # Input Module
//!
//! Input handling for the CLI: loading template documents from JSON, YAML or
//! stdin, and assembling variable values from files and `-e` overrides.

pub mod env;
pub mod loader;
