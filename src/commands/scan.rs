// commands/scan.rs

//! # Scan Command Module
//!
//! Lists the `{{variable|fallback}}` tokens a template references, in document
//! order, one entry per distinct name.
//!
//! ## Example Usage
//! ```bash
//! ./mailframe scan welcome.json
//! ./mailframe scan welcome.json --format json
//! ```

use clap::{Arg, ArgMatches, Command};

use crate::commands::common_args::{self, args_from_matches};
use crate::commands::{exit_on_error, write_output};
use crate::input::loader::load_template;
use crate::error::AppResult;
use crate::print_info;
use crate::template::{scan, VariableToken};

/// Defines the `scan` command for the CLI application.
pub fn command() -> Command {
    Command::new("scan")
        .about("List the variables a template references")
        .arg(common_args::template())
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(common_args::output())
}

/// Executes the `scan` command.
pub fn execute(matches: &ArgMatches) {
    exit_on_error(run(matches));
}

fn run(matches: &ArgMatches) -> AppResult<()> {
    let args = args_from_matches(matches)?;
    let template = load_template(args.template)?;
    let tokens = scan(&template);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let output = matches.get_one::<String>("output").map(String::as_str);

    let contents = match format {
        "json" => format!("{}\n", serde_json::to_string_pretty(&tokens)?),
        _ => {
            if tokens.is_empty() {
                print_info!("No variables found in {}", args.template);
                return Ok(());
            }
            format_text(&tokens)
        }
    };
    write_output(output, &contents)
}

/// One line per token: the name, then its fallback when declared.
pub fn format_text(tokens: &[VariableToken]) -> String {
    let width = tokens.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    tokens
        .iter()
        .map(|token| match &token.fallback {
            Some(fallback) => format!("{:<width$}  (fallback: {})\n", token.name, fallback, width = width),
            None => format!("{}\n", token.name),
        })
        .collect()
}
