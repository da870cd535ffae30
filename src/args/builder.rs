//! Argument builder - validates raw input against a tool schema
//!
//! The output map holds only keys the schema knows about, each carrying a
//! value of the option's kind. Unsupplied optional options are left out
//! entirely unless the schema declares a default.

use serde_json::{Map, Number, Value};

use crate::error::ValidationError;
use crate::schema::{OptionKind, OptionSpec, ToolSchema};

use super::raw::{RawInput, RawValue};

/// Canonical argument payload sent to the gateway
pub type ArgumentMap = Map<String, Value>;

/// Validate `input` against `schema` and produce the argument payload
pub fn build_arguments(schema: &ToolSchema, input: &RawInput) -> Result<ArgumentMap, ValidationError> {
    let mut arguments = ArgumentMap::new();

    for option in &schema.options {
        match input.get(&option.key).filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                let value = coerce(option, raw)?;
                arguments.insert(option.key.clone(), value);
            }
            None if option.required => {
                return Err(ValidationError::MissingRequiredOption(option.key.clone()));
            }
            None => {
                if let Some(default) = &option.default {
                    arguments.insert(option.key.clone(), default.clone());
                }
            }
        }
    }

    for key in input.keys().filter(|k| schema.option(k).is_none()) {
        log::debug!("Ignoring unrecognized option '{}' for tool '{}'", key, schema.name);
    }

    Ok(arguments)
}

fn coerce(option: &OptionSpec, raw: &RawValue) -> Result<Value, ValidationError> {
    match option.kind {
        OptionKind::Boolean => Ok(Value::Bool(true)),
        OptionKind::String => {
            let token = scalar_token(raw);
            check_choice(option, token)?;
            Ok(Value::String(token.to_string()))
        }
        OptionKind::Number => {
            let token = scalar_token(raw);
            check_choice(option, token)?;
            parse_number(token).ok_or_else(|| ValidationError::InvalidNumber {
                key: option.key.clone(),
                raw: token.to_string(),
            })
        }
        OptionKind::StringList => {
            let tokens = raw.tokens();
            for token in &tokens {
                check_choice(option, token)?;
            }
            Ok(Value::Array(
                tokens.into_iter().map(|t| Value::String(t.to_string())).collect(),
            ))
        }
    }
}

fn scalar_token(raw: &RawValue) -> &str {
    // Callers filter out empty lists, so a token is always present
    raw.last_token().unwrap_or_default()
}

fn check_choice(option: &OptionSpec, token: &str) -> Result<(), ValidationError> {
    if option.allows(token) {
        return Ok(());
    }
    Err(ValidationError::InvalidChoice {
        key: option.key.clone(),
        raw: token.to_string(),
        choices: option.choices.clone().unwrap_or_default(),
    })
}

/// Parse a finite number; integral values become JSON integers
fn parse_number(token: &str) -> Option<Value> {
    let parsed: f64 = token.trim().parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    if parsed.fract() == 0.0 && parsed.abs() < i64::MAX as f64 {
        return Some(Value::Number(Number::from(parsed as i64)));
    }
    Number::from_f64(parsed).map(Value::Number)
}
