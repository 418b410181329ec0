// main.rs

//! # Mailframe - Main Entry Point
//!
//! Initializes the CLI, configures logging, and dispatches to the
//! subcommands (`render`, `scan`, `resolve`, `validate`).
//!
//! ## Global Arguments
//!
//! - `--log-level` - The logging level (default: `info`). Possible values: `error`, `warn`, `info`, `debug`, `trace`.
//!
//! ## Example Usage
//! ```bash
//! ./mailframe render welcome.json -e name=Ada > welcome.html
//! ./mailframe scan welcome.json --format json
//! ./mailframe --log-level debug validate promo.yaml
//! ```
//!
//! For detailed help, use `--help` or `-h` flags.

use std::process;

use clap::{Arg, ArgAction, Command};
use log::debug;

use mailframe::app::{APP_AUTHOR, APP_DESCRIPTION, APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL, LOG_LEVELS};
use mailframe::commands;
use mailframe::print_error;
use mailframe::utils::logging::initialize_logger;

/// Main function that initializes the CLI and handles command execution.
fn main() {
    let matches = Command::new(APP_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_DESCRIPTION)
        // ====================
        // Global Flags
        // ====================
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Set the logging level")
                .global(true)
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS))
                .ignore_case(true)
                .default_value(DEFAULT_LOG_LEVEL)
                .action(ArgAction::Set),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // ====================
        // Subcommand Definitions
        // ====================
        .subcommand(commands::render::command())
        .subcommand(commands::scan::command())
        .subcommand(commands::resolve::command())
        .subcommand(commands::validate::command())
        .get_matches();

    // ====================
    // Initialize Logger
    // ====================
    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(DEFAULT_LOG_LEVEL);
    initialize_logger(log_level);

    debug!("Logger initialized with level: {}", log_level);

    // ====================
    // Command Execution
    // ====================
    match matches.subcommand() {
        Some(("render", sub_matches)) => commands::render::execute(sub_matches),
        Some(("scan", sub_matches)) => commands::scan::execute(sub_matches),
        Some(("resolve", sub_matches)) => commands::resolve::execute(sub_matches),
        Some(("validate", sub_matches)) => commands::validate::execute(sub_matches),
        _ => {
            print_error!("Unknown command. Use --help for usage.");
            process::exit(1);
        }
    }
}
