// commands/render.rs

//! # Render Command Module
//!
//! Renders a template to HTML, substituting variable values from files, `-e`
//! flags, built-ins and (with `--sample`) synthetic samples.
//!
//! ## Example Usage
//! ```bash
//! ./mailframe render welcome.json -e name=Ada --output welcome.html
//! ./mailframe render receipt.yaml --vars order.json --fragment
//! cat promo.json | ./mailframe render - --sample --now 2026-11-27
//! ```

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;

use crate::commands::common_args::{self, args_from_matches};
use crate::commands::{exit_on_error, write_output};
use crate::input::loader::load_template;
use crate::error::AppResult;
use crate::render::{DocumentMode, Renderer};
use crate::utils::display::print_unicode_box;
use crate::{print_success, print_warning};

/// Defines the `render` command for the CLI application.
pub fn command() -> Command {
    Command::new("render")
        .about("Render a template to HTML")
        .arg(common_args::template())
        .args(common_args::variable_args())
        .arg(
            Arg::new("fragment")
                .long("fragment")
                .help("Emit only the email tables, without <html>/<head>")
                .action(ArgAction::SetTrue),
        )
        .arg(common_args::output())
}

/// Executes the `render` command.
pub fn execute(matches: &ArgMatches) {
    exit_on_error(run(matches));
}

fn run(matches: &ArgMatches) -> AppResult<()> {
    let args = args_from_matches(matches)?;
    let output = matches.get_one::<String>("output").map(String::as_str);
    if output.is_some() {
        print_unicode_box(&format!("📨 Rendering template: [{}]", args.template));
    }

    let template = load_template(args.template)?;
    let values = args.values_for(&template)?;
    let mode = if matches.get_flag("fragment") {
        DocumentMode::Fragment
    } else {
        DocumentMode::Document
    };
    debug!("Document Mode: {:?}", mode);

    let rendered = Renderer::new()
        .with_now(args.now)
        .with_mode(mode)
        .with_missing_policy(args.missing)
        .render(&template, &values)?;

    for notice in &rendered.notices {
        print_warning!("⚠️  {}", notice);
    }

    write_output(output, &rendered.html)?;
    if let Some(path) = output {
        print_success!("Wrote {} ({} bytes)", path, rendered.html.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("welcome.json");
        let output_path = dir.path().join("welcome.html");
        fs::File::create(&template_path)
            .unwrap()
            .write_all(br#"{ "title": { "text": "Welcome {{name|Friend}}" }, "footer": { "companyName": "Acme" } }"#)
            .unwrap();

        let matches = command()
            .try_get_matches_from([
                "render",
                template_path.to_str().unwrap(),
                "-e",
                "name=Ada",
                "--now",
                "2030-05-01",
                "--output",
                output_path.to_str().unwrap(),
            ])
            .unwrap();
        run(&matches).unwrap();

        let html = fs::read_to_string(&output_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Welcome Ada"));
        assert!(html.contains("&copy; 2030 Acme."));
    }

    #[test]
    fn test_render_rejects_non_object_template() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("list.json");
        fs::write(&template_path, "[1, 2, 3]").unwrap();

        let matches = command()
            .try_get_matches_from(["render", template_path.to_str().unwrap()])
            .unwrap();
        let err = run(&matches).unwrap_err();
        assert!(err.to_string().contains("Invalid template structure"));
    }
}
