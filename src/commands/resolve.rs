// commands/resolve.rs

//! # Resolve Command Module
//!
//! Prints a template with its variables substituted, decoded into the typed
//! structure and serialized back. Fields that could not be decoded are
//! dropped, so the output shows exactly what `render` would use.
//!
//! ## Example Usage
//! ```bash
//! ./mailframe resolve welcome.json --vars values.json
//! ```

use clap::{ArgMatches, Command};

use crate::commands::common_args::{self, args_from_matches};
use crate::commands::{exit_on_error, write_output};
use crate::input::loader::load_template;
use crate::error::AppResult;
use crate::template::{Resolver, TemplateStructure};

/// Defines the `resolve` command for the CLI application.
pub fn command() -> Command {
    Command::new("resolve")
        .about("Print the template structure with variables substituted")
        .arg(common_args::template())
        .args(common_args::variable_args())
        .arg(common_args::output())
}

/// Executes the `resolve` command.
pub fn execute(matches: &ArgMatches) {
    exit_on_error(run(matches));
}

fn run(matches: &ArgMatches) -> AppResult<()> {
    let args = args_from_matches(matches)?;
    let template = load_template(args.template)?;

    let values = args.values_for(&template)?;
    let resolved = Resolver::new(&values)
        .with_policy(args.missing)
        .resolve_value(&template);
    let structure = TemplateStructure::from_value(&resolved)?;

    let output = matches.get_one::<String>("output").map(String::as_str);
    let contents = format!("{}\n", serde_json::to_string_pretty(&structure.to_value()?)?);
    write_output(output, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;

    #[test]
    fn test_resolve_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("t.json");
        let output_path = dir.path().join("resolved.json");
        fs::write(
            &template_path,
            r#"{ "title": { "text": "Hi {{name|Friend}}", "size": 7 },
                 "visual": { "type": "progress", "progressBars": [{ "label": "Used", "current": "{{used}}", "max": 10 }] },
                 "unknown": true }"#,
        )
        .unwrap();

        let matches = command()
            .try_get_matches_from([
                "resolve",
                template_path.to_str().unwrap(),
                "-e",
                "used=4",
                "--output",
                output_path.to_str().unwrap(),
            ])
            .unwrap();
        run(&matches).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(written["title"]["text"], json!("Hi Friend"));
        assert_eq!(written["title"]["size"], json!("7"));
        assert_eq!(written["visual"]["progressBars"][0]["current"], json!(4.0));
        assert!(written.get("unknown").is_none());
    }
}
