// commands/validate.rs

//! # Validate Command Module
//!
//! Checks that a template decodes and reports what a render would do with
//! it: which sections are present, which variables have no fallback, and any
//! hero image width without a fixed-pixel equivalent. Only a structural error
//! (a root that is not an object) fails the command.
//!
//! ## Example Usage
//! ```bash
//! ./mailframe validate promo.yaml
//! ```

use clap::{ArgMatches, Command};

use crate::commands::common_args::{self, args_from_matches};
use crate::commands::exit_on_error;
use crate::input::loader::load_template;
use crate::error::AppResult;
use crate::render::{Notice, Renderer};
use crate::template::{scan, TemplateStructure};
use crate::utils::display::print_unicode_box;
use crate::{print_info, print_success, print_warning};

/// Defines the `validate` command for the CLI application.
pub fn command() -> Command {
    Command::new("validate")
        .about("Check a template and report its sections and variables")
        .arg(common_args::template())
}

/// Executes the `validate` command.
pub fn execute(matches: &ArgMatches) {
    exit_on_error(run(matches).map(|report| report.print()));
}

/// What `validate` found.
#[derive(Debug)]
pub struct ValidationReport {
    pub template: String,
    pub sections: Vec<&'static str>,
    pub variables: usize,
    pub notices: Vec<Notice>,
}

impl ValidationReport {
    fn print(&self) {
        print_unicode_box(&format!("🔎 Validating template: [{}]", self.template));
        if self.sections.is_empty() {
            print_warning!("No sections present; the email will be empty");
        } else {
            print_info!("Sections: {}", self.sections.join(", "));
        }
        print_info!("Variables: {}", self.variables);
        for notice in &self.notices {
            print_warning!("⚠️  {}", notice);
        }
        print_success!("Template is valid");
    }
}

fn run(matches: &ArgMatches) -> AppResult<ValidationReport> {
    let args = args_from_matches(matches)?;
    let template = load_template(args.template)?;
    let structure = TemplateStructure::from_value(&template)?;

    let rendered = Renderer::new().render(&template, &Default::default())?;

    Ok(ValidationReport {
        template: args.template.to_string(),
        sections: structure
            .present_sections()
            .into_iter()
            .map(|kind| kind.as_str())
            .collect(),
        variables: scan(&template).len(),
        notices: rendered.notices,
    })
}
