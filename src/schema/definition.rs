//! Tool schema definitions and option kinds
//!
//! A `ToolSchema` describes the options one remote tool accepts. Schemas are
//! plain data so a single driver can serve every tool.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Value type accepted by an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    /// Single string token
    String,
    /// Finite number, sent as a JSON integer when integral
    Number,
    /// Presence flag, sent as `true` when present
    Boolean,
    /// Repeated string tokens, sent as a JSON array
    #[serde(alias = "stringList", alias = "string_list")]
    StringList,
}

impl Default for OptionKind {
    fn default() -> Self {
        Self::String
    }
}

impl OptionKind {
    /// Check that a JSON value has the shape this kind produces
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// One option accepted by a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Argument name sent to the gateway
    pub key: String,
    /// Command-line flag name, when it differs from the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(default)]
    pub kind: OptionKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    /// Create an optional string option
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            flag: None,
            kind: OptionKind::String,
            required: false,
            choices: None,
            default: None,
            description: None,
        }
    }

    /// Create a string option
    pub fn string(key: impl Into<String>) -> Self {
        Self::new(key)
    }

    /// Create a number option
    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key).with_kind(OptionKind::Number)
    }

    /// Create a boolean flag option
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key).with_kind(OptionKind::Boolean)
    }

    /// Create a string list option
    pub fn string_list(key: impl Into<String>) -> Self {
        Self::new(key).with_kind(OptionKind::StringList)
    }

    pub fn with_kind(mut self, kind: OptionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set command-line flag name
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Restrict values to a fixed set
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Flag name used on the command line (falls back to the key)
    pub fn flag_name(&self) -> &str {
        self.flag.as_deref().unwrap_or(&self.key)
    }

    /// Check whether a raw token is allowed by `choices`
    pub fn allows(&self, raw: &str) -> bool {
        match &self.choices {
            Some(choices) => choices.iter().any(|c| c == raw),
            None => true,
        }
    }

    fn check_default(&self, default: &Value) -> std::result::Result<(), String> {
        if !self.kind.accepts(default) {
            return Err(format!("default for '{}' does not match kind {:?}", self.key, self.kind));
        }
        let tokens: Vec<&str> = match default {
            Value::String(s) => vec![s.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        if let Some(bad) = tokens.into_iter().find(|t| !self.allows(t)) {
            return Err(format!("default '{}' for '{}' is not one of its choices", bad, self.key));
        }
        Ok(())
    }
}

/// Declarative description of one remote tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name, unique within its server namespace
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-tool timeout override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl ToolSchema {
    /// Create a schema with no options
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            timeout_ms: None,
            options: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Append an option
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Look up an option by key
    pub fn option(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.key == key)
    }

    /// Get effective timeout (uses the given default if not specified)
    pub fn effective_timeout_ms(&self, default_ms: u64) -> u64 {
        self.timeout_ms.unwrap_or(default_ms)
    }

    /// Check schema invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| BridgeError::InvalidSchema {
            tool: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("tool name is empty".to_string()));
        }

        let mut keys = HashSet::new();
        let mut flags = HashSet::new();
        for option in &self.options {
            if option.key.is_empty() {
                return Err(invalid("option key is empty".to_string()));
            }
            if !keys.insert(option.key.as_str()) {
                return Err(invalid(format!("duplicate option key '{}'", option.key)));
            }
            if !flags.insert(option.flag_name()) {
                return Err(invalid(format!("duplicate flag '--{}'", option.flag_name())));
            }
            if let Some(default) = &option.default {
                if option.required {
                    return Err(invalid(format!("required option '{}' has a default", option.key)));
                }
                option.check_default(default).map_err(invalid)?;
            }
            if option.kind == OptionKind::Boolean && option.choices.is_some() {
                return Err(invalid(format!("boolean option '{}' cannot have choices", option.key)));
            }
        }
        Ok(())
    }
}
