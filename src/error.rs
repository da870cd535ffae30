//! Error types for toolbridge
//!
//! Centralized error handling using thiserror.

use std::fmt;

use thiserror::Error;

/// Input rejected by the argument builder before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required option was not supplied
    #[error("missing required option '{0}'")]
    MissingRequiredOption(String),

    /// A number option received a token that does not parse
    #[error("invalid number for '{key}': {raw}")]
    InvalidNumber { key: String, raw: String },

    /// A value outside the option's declared choices
    #[error("invalid value '{raw}' for '{key}' (expected one of: {})", .choices.join(", "))]
    InvalidChoice {
        key: String,
        raw: String,
        choices: Vec<String>,
    },
}

/// Classification of a failed round trip to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused or host could not be resolved
    Unreachable,
    /// No response within the configured timeout
    Timeout,
    /// Gateway answered with a non-2xx status
    HttpStatus(u16),
    /// 2xx response whose body is not a gateway envelope
    InvalidResponse,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "unreachable"),
            Self::Timeout => write!(f, "timeout"),
            Self::HttpStatus(code) => write!(f, "http {}", code),
            Self::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

/// All error types that can occur in toolbridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Argument validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote tool rejected the call
    #[error("[{code}] {message}")]
    Tool { code: String, message: String },

    /// The call never produced a gateway verdict
    #[error("{message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    /// Server namespace not present in the catalog
    #[error("Unknown server: {0}")]
    UnknownServer(String),

    /// Tool not present in the server namespace
    #[error("Unknown tool '{tool}' for server '{server}'")]
    UnknownTool { server: String, tool: String },

    /// A tool schema breaks one of its invariants
    #[error("Invalid schema for '{tool}': {reason}")]
    InvalidSchema { tool: String, reason: String },

    /// Catalog file could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Command line could not be parsed
    #[error("{0}")]
    Usage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BridgeError {
    /// Short name of the failure class, for logs
    pub fn class(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Tool { .. } => "tool",
            Self::Transport { .. } => "transport",
            Self::UnknownServer(_) | Self::UnknownTool { .. } | Self::Usage(_) => "usage",
            Self::InvalidSchema { .. } | Self::Catalog(_) | Self::Yaml(_) => "catalog",
            Self::Io(_) | Self::Json(_) | Self::Http(_) => "internal",
        }
    }

    /// Process exit code; every failure class maps to 1
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for toolbridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_option_error() {
        let err = ValidationError::MissingRequiredOption("uid".to_string());
        assert_eq!(err.to_string(), "missing required option 'uid'");
    }

    #[test]
    fn test_invalid_number_mentions_raw_token() {
        let err = ValidationError::InvalidNumber {
            key: "width".to_string(),
            raw: "wide".to_string(),
        };
        assert_eq!(err.to_string(), "invalid number for 'width': wide");
    }

    #[test]
    fn test_invalid_choice_lists_choices() {
        let err = ValidationError::InvalidChoice {
            key: "action".to_string(),
            raw: "ignore".to_string(),
            choices: vec!["accept".to_string(), "dismiss".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'ignore' for 'action' (expected one of: accept, dismiss)"
        );
    }

    #[test]
    fn test_tool_error_display() {
        let err = BridgeError::Tool {
            code: "BAD_ARG".to_string(),
            message: "x".to_string(),
        };
        assert_eq!(err.to_string(), "[BAD_ARG] x");
    }

    #[test]
    fn test_transport_kind_display() {
        assert_eq!(TransportErrorKind::Unreachable.to_string(), "unreachable");
        assert_eq!(TransportErrorKind::Timeout.to_string(), "timeout");
        assert_eq!(TransportErrorKind::HttpStatus(502).to_string(), "http 502");
    }

    #[test]
    fn test_validation_conversion() {
        let err: BridgeError = ValidationError::MissingRequiredOption("uid".into()).into();
        assert!(matches!(err, BridgeError::Validation(_)));
        assert_eq!(err.to_string(), "missing required option 'uid'");
    }

    #[test]
    fn test_every_class_exits_one() {
        let errors = vec![
            BridgeError::Validation(ValidationError::MissingRequiredOption("a".into())),
            BridgeError::Tool {
                code: "C".into(),
                message: "m".into(),
            },
            BridgeError::Transport {
                kind: TransportErrorKind::Timeout,
                message: "m".into(),
            },
            BridgeError::UnknownServer("s".into()),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_error_class_names() {
        let err = BridgeError::Transport {
            kind: TransportErrorKind::Unreachable,
            message: "down".into(),
        };
        assert_eq!(err.class(), "transport");
        assert_eq!(BridgeError::Catalog("bad".into()).class(), "catalog");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: BridgeError = json_err.into();
        assert!(matches!(err, BridgeError::Json(_)));
    }
}
