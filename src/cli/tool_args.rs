//! Per-tool flag parsing generated from a tool schema
//!
//! Clap only splits the command line into raw values here. Requiredness,
//! number parsing and choices are left to the argument builder so every
//! validation failure takes the same path.

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::args::{RawInput, RawValue};
use crate::schema::{OptionKind, OptionSpec, ToolSchema};

/// Build the clap command describing one tool's flags
pub fn tool_command(server: &str, schema: &ToolSchema) -> Command {
    let mut command = Command::new(schema.name.clone())
        .bin_name(format!("toolbridge call {} {}", server, schema.name))
        .no_binary_name(true)
        .disable_version_flag(true)
        .args_override_self(true);

    if let Some(description) = &schema.description {
        command = command.about(description.clone());
    }

    for option in &schema.options {
        command = command.arg(option_arg(option));
    }
    command
}

fn option_arg(option: &OptionSpec) -> Arg {
    let arg = Arg::new(option.key.clone())
        .long(option.flag_name().to_string())
        .help(help_text(option));

    match option.kind {
        OptionKind::Boolean => arg.action(ArgAction::SetTrue),
        OptionKind::StringList => arg
            .action(ArgAction::Append)
            .num_args(1..)
            .value_name("VALUE"),
        OptionKind::String | OptionKind::Number => arg
            .action(ArgAction::Set)
            .num_args(1)
            .value_name(if option.kind == OptionKind::Number { "NUMBER" } else { "VALUE" })
            .allow_hyphen_values(true),
    }
}

fn help_text(option: &OptionSpec) -> String {
    let mut parts = Vec::new();
    if let Some(description) = &option.description {
        parts.push(description.clone());
    }
    if option.required {
        parts.push("[required]".to_string());
    }
    if let Some(choices) = &option.choices {
        parts.push(format!("[possible values: {}]", choices.join(", ")));
    }
    if let Some(default) = &option.default {
        parts.push(format!("[default: {}]", default));
    }
    parts.join(" ")
}

/// Split `args` into raw option values keyed by option key
pub fn parse_tool_args(server: &str, schema: &ToolSchema, args: &[String]) -> Result<RawInput, clap::Error> {
    let matches = tool_command(server, schema).try_get_matches_from(args)?;
    Ok(collect_raw(schema, &matches))
}

fn collect_raw(schema: &ToolSchema, matches: &ArgMatches) -> RawInput {
    let mut input = RawInput::new();
    for option in &schema.options {
        let key = option.key.as_str();
        match option.kind {
            OptionKind::Boolean => {
                if matches.get_flag(key) {
                    input.insert(key, RawValue::Flag);
                }
            }
            OptionKind::StringList => {
                if let Some(values) = matches.get_many::<String>(key) {
                    input.insert(key, RawValue::List(values.cloned().collect()));
                }
            }
            OptionKind::String | OptionKind::Number => {
                if let Some(value) = matches.get_one::<String>(key) {
                    input.insert(key, RawValue::Value(value.clone()));
                }
            }
        }
    }
    input
}
