// commands/common_args.rs

//! # Common Command Arguments
//!
//! Arguments shared by the `render`, `resolve`, `scan` and `validate`
//! commands, and the step that turns them into variable values.

use chrono::{DateTime, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use log::debug;
use serde_json::Value;

use crate::input::env::load_variable_values;
use crate::error::{AppError, AppResult};
use crate::render::calc::parse_target;
use crate::template::{scan, MissingPolicy, PreviewSession, VariableValues};

// Positional arguments
/// Template document: a JSON or YAML file, or `-` for stdin
pub fn template() -> Arg {
    Arg::new("template")
        .required(true)
        .help("Template file (.json, .yaml, .yml) or - for stdin")
}

// Optional arguments
/// File of variable values (JSON or YAML object)
pub fn vars_file() -> Arg {
    Arg::new("vars")
        .long("vars")
        .value_name("FILE")
        .help("Variable values file (JSON or YAML object)")
        .action(ArgAction::Set)
}

/// dotenv-style file of variable values
pub fn env_file() -> Arg {
    Arg::new("env-file")
        .long("env-file")
        .value_name("FILE")
        .help("Variable values file in KEY=VALUE format")
        .action(ArgAction::Set)
}

/// Additional variable values
pub fn env_var() -> Arg {
    Arg::new("env")
        .short('e')
        .long("env")
        .value_name("KEY=VALUE")
        .help("Set a variable value (repeatable, overrides files)")
        .action(ArgAction::Append)
}

/// Fill every variable still missing a value with a sample
pub fn sample() -> Arg {
    Arg::new("sample")
        .long("sample")
        .help("Use sample values for variables without a value")
        .action(ArgAction::SetTrue)
}

/// Fixed instant for countdowns and the copyright year
pub fn now() -> Arg {
    Arg::new("now")
        .long("now")
        .value_name("ISO_DATE")
        .help("Render as of this date/time instead of the current time")
        .action(ArgAction::Set)
}

/// What to emit for tokens with neither a value nor a fallback
pub fn missing() -> Arg {
    Arg::new("missing")
        .long("missing")
        .help("Unresolved tokens: keep them verbatim or blank them out")
        .value_parser(value_parser!(MissingPolicy))
        .default_value("keep")
}

/// Write to a file instead of stdout
pub fn output() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("Write the result to FILE instead of stdout")
        .action(ArgAction::Set)
}

/// All of the variable-related arguments.
pub fn variable_args() -> Vec<Arg> {
    vec![vars_file(), env_file(), env_var(), sample(), now(), missing()]
}

/// Structure to hold common command arguments
#[derive(Debug)]
pub struct CommonCommandArgs<'a> {
    /// Template path or `-`
    pub template: &'a str,
    pub vars_file: Option<&'a str>,
    pub env_file: Option<&'a str>,
    /// Raw `-e` values
    pub overrides: Vec<String>,
    pub sample: bool,
    /// The instant to render at
    pub now: DateTime<Utc>,
    pub missing: MissingPolicy,
}

/// Create CommonCommandArgs from ArgMatches. Commands without the variable
/// arguments get the defaults.
pub fn args_from_matches(matches: &ArgMatches) -> AppResult<CommonCommandArgs<'_>> {
    let template = matches
        .get_one::<String>("template")
        .map(String::as_str)
        .ok_or_else(|| AppError::InvalidArgument("a template path is required".to_string()))?;

    let now = match string_arg(matches, "now") {
        Some(raw) => parse_target(raw).ok_or_else(|| {
            AppError::InvalidArgument(format!("--now is not a valid date or date-time: {}", raw))
        })?,
        None => Utc::now(),
    };

    let args = CommonCommandArgs {
        template,
        vars_file: string_arg(matches, "vars"),
        env_file: string_arg(matches, "env-file"),
        overrides: if has_arg(matches, "env") {
            matches
                .get_many::<String>("env")
                .map(|vals| vals.cloned().collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        },
        sample: has_arg(matches, "sample") && matches.get_flag("sample"),
        now,
        missing: if has_arg(matches, "missing") {
            matches.get_one::<MissingPolicy>("missing").copied().unwrap_or_default()
        } else {
            MissingPolicy::default()
        },
    };
    log_common_command_args(&args);
    Ok(args)
}

fn has_arg(matches: &ArgMatches, id: &str) -> bool {
    matches.try_contains_id(id).unwrap_or(false)
}

fn string_arg<'m>(matches: &'m ArgMatches, id: &str) -> Option<&'m str> {
    if has_arg(matches, id) {
        matches.get_one::<String>(id).map(String::as_str)
    } else {
        None
    }
}

/// Log common command arguments at debug level
pub fn log_common_command_args(args: &CommonCommandArgs) {
    debug!("Template: {}", args.template);
    debug!("Variables File: {:?}", args.vars_file);
    debug!("Environment File: {:?}", args.env_file);
    if !args.overrides.is_empty() {
        debug!("Variable Overrides:");
        for var in &args.overrides {
            debug!("  - {}", var);
        }
    }
    debug!("Sample Values: {}", args.sample);
    debug!("Now: {}", args.now.to_rfc3339());
    debug!("Missing Policy: {:?}", args.missing);
}

impl CommonCommandArgs<'_> {
    /// Builds the values for `template`: files and overrides, built-ins, then
    /// samples when requested.
    pub fn values_for(&self, template: &Value) -> AppResult<VariableValues> {
        let loaded = load_variable_values(self.vars_file, self.env_file, &self.overrides)?;
        let mut session = PreviewSession::with_values(loaded);
        session.add_built_ins(self.now);
        if self.sample {
            let added = session.fill_samples(&scan(template));
            debug!("Filled {} sample value(s)", added);
        }
        Ok(session.values().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;
    use serde_json::json;

    fn cmd() -> Command {
        Command::new("render").arg(template()).args(variable_args())
    }

    #[test]
    fn test_defaults() {
        let matches = cmd().try_get_matches_from(["render", "t.json"]).unwrap();
        let args = args_from_matches(&matches).unwrap();
        assert_eq!(args.template, "t.json");
        assert!(args.overrides.is_empty());
        assert!(!args.sample);
        assert_eq!(args.missing, MissingPolicy::Keep);
    }

    #[test]
    fn test_parses_flags() {
        let matches = cmd()
            .try_get_matches_from([
                "render", "-", "-e", "name=Ada", "--env", "plan=Pro", "--sample",
                "--now", "2026-01-02T03:04:05Z", "--missing", "blank",
            ])
            .unwrap();
        let args = args_from_matches(&matches).unwrap();
        assert_eq!(args.template, "-");
        assert_eq!(args.overrides, vec!["name=Ada", "plan=Pro"]);
        assert!(args.sample);
        assert_eq!(args.now.to_rfc3339(), "2026-01-02T03:04:05+00:00");
        assert_eq!(args.missing, MissingPolicy::Blank);
    }

    #[test]
    fn test_rejects_bad_now() {
        let matches = cmd()
            .try_get_matches_from(["render", "t.json", "--now", "tomorrow"])
            .unwrap();
        assert!(matches!(args_from_matches(&matches), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_bad_missing_policy() {
        assert!(cmd()
            .try_get_matches_from(["render", "t.json", "--missing", "shout"])
            .is_err());
    }

    #[test]
    fn test_template_only_command() {
        let matches = Command::new("scan")
            .arg(template())
            .try_get_matches_from(["scan", "t.json"])
            .unwrap();
        let args = args_from_matches(&matches).unwrap();
        assert!(args.vars_file.is_none());
        assert!(!args.sample);
    }

    #[test]
    fn test_values_for_samples_and_built_ins() {
        let matches = cmd()
            .try_get_matches_from(["render", "t.json", "-e", "name=Ada", "--sample", "--now", "2026-10-16"])
            .unwrap();
        let args = args_from_matches(&matches).unwrap();
        let template = json!({ "title": { "text": "{{name}} {{plan|Free}} {{support_email}}" } });

        let values = args.values_for(&template).unwrap();
        assert_eq!(values.get("name").map(|v| v.to_string()), Some("Ada".to_string()));
        assert_eq!(values.get("plan").map(|v| v.to_string()), Some("Free".to_string()));
        assert_eq!(
            values.get("support_email").map(|v| v.to_string()),
            Some("alex.morgan@example.com".to_string())
        );
        assert_eq!(values.get("current_year").map(|v| v.to_string()), Some("2026".to_string()));
    }
}
