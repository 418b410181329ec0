// commands/mod.rs

//! # Commands Module
//!
//! One module per subcommand, each exposing `command()` for the clap
//! definition and `execute()` to run it.

pub mod common_args;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod validate;

use std::fs;
use std::process;

use log::debug;

use crate::error::{AppError, AppResult};
use crate::print_error;

/// Prints the error and exits with status 1.
pub fn exit_on_error<T>(result: AppResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            print_error!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Writes `contents` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, contents: &str) -> AppResult<()> {
    match path {
        Some(path) => {
            debug!("Writing {} bytes to {}", contents.len(), path);
            fs::write(path, contents).map_err(|e| AppError::io(path, e))
        }
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_output(path.to_str(), "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_write_output_bad_path() {
        let err = write_output(Some("/no/such/dir/out.html"), "x").unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
